use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::exports::handlers::{self, ExportState};
use crate::features::exports::services::ExportService;

/// Create routes for the exports feature
///
/// All routes require the auth middleware to be applied by the caller
pub fn routes(export_service: Arc<ExportService>) -> Router {
    let state = ExportState { export_service };

    Router::new()
        .route("/api/exports", post(handlers::create_export))
        .route("/api/exports/{id}", get(handlers::get_export))
        .with_state(state)
}
