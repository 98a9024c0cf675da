//! Report capture and retrieval
//!
//! A report is a photo the AI has analyzed, stamped with where it was taken.
//! Submission runs the full pipeline (validate, locate, classify, upload,
//! insert); retrieval serves the owner's list, map projection, and stats.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{ClassificationService, ReportService, SubmissionService};
