mod classification_service;
mod report_service;
mod submission_service;

pub use classification_service::ClassificationService;
pub use report_service::ReportService;
pub use submission_service::{SubmissionService, SubmittedImage, SubmittedLocation};
