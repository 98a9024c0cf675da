use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::location::handlers::{self, LocationState};
use crate::features::location::services::{GeocodingService, LocationService};

/// Create routes for the location feature
///
/// All routes require authentication
pub fn routes(
    location_service: Arc<LocationService>,
    geocoding_service: Arc<GeocodingService>,
) -> Router {
    let state = LocationState {
        location_service,
        geocoding_service,
    };

    Router::new()
        .route("/api/location/address", get(handlers::get_address))
        .route("/api/location/position", get(handlers::get_position))
        .with_state(state)
}
