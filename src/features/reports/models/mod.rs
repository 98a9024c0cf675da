mod report;

pub use report::{
    NewReport, Report, ReportAnalysis, ReportKind, StreetAnalysis, WasteAnalysis,
};
