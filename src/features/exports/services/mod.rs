mod export_service;

pub use export_service::{ExportJob, ExportService, ExportStatus};
