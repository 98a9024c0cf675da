//! Model response parsing with graceful fallback.
//!
//! The vision model replies with free text that should contain JSON. This
//! module extracts and repairs that JSON and parses it into typed payloads
//! that always resolve to a value, falling back to the type's default marked
//! with the parse error.

pub mod parser;
pub mod response;

pub use parser::parse_with_fallback;
pub use response::{default_true, LlmResponse};
