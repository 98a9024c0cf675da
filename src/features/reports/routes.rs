use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::features::reports::handlers::{self, ReportState};
use crate::features::reports::services::{ReportService, SubmissionService};
use crate::shared::constants::MAX_IMAGE_SIZE_BYTES;

/// Create routes for the reports feature
///
/// All routes require the auth middleware to be applied by the caller
pub fn routes(
    report_service: Arc<ReportService>,
    submission_service: Arc<SubmissionService>,
) -> Router {
    let state = ReportState {
        report_service,
        submission_service,
    };

    Router::new()
        .route(
            "/api/reports/waste",
            // Allow body size up to MAX_IMAGE_SIZE_BYTES + buffer for multipart overhead
            post(handlers::submit_waste_report)
                .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE_BYTES + 1024 * 1024)),
        )
        .route(
            "/api/reports/street",
            post(handlers::submit_street_report)
                .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE_BYTES + 1024 * 1024)),
        )
        .route("/api/reports", get(handlers::list_reports))
        .route("/api/reports/heatmap", get(handlers::get_heatmap))
        .route("/api/reports/stats", get(handlers::get_stats))
        .route("/api/reports/{id}", delete(handlers::delete_report))
        .with_state(state)
}
