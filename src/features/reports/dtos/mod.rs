mod report_dto;

pub use report_dto::{
    HeatmapPoint, ListReportsQuery, LocationResponse, ReportPresentation, ReportResponse,
    StatsResponse, SubmitReportForm,
};
