//! Asynchronous delivery of a user's report list to the spreadsheet webhook
//!
//! Replaces a fire-and-forget POST with a polled job: the caller receives a
//! job id immediately and reads back a real success or failure signal.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::ExportService;
