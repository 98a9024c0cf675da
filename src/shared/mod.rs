//! Shared building blocks used across features.

pub mod constants;
pub mod llm;
pub mod presentation;
pub mod prompts;
pub mod test_helpers;
pub mod types;
pub mod validation;
