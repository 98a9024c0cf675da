use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::location::dtos::{AddressQuery, AddressResponse, PositionMode, PositionQuery};
use crate::features::location::services::{GeocodingService, LocationService, ResolvedLocation};
use crate::shared::types::ApiResponse;

/// State for location handlers
#[derive(Clone)]
pub struct LocationState {
    pub location_service: Arc<LocationService>,
    pub geocoding_service: Arc<GeocodingService>,
}

/// Reverse geocode a coordinate pair into a display address
#[utoipa::path(
    get,
    path = "/api/location/address",
    params(AddressQuery),
    responses(
        (status = 200, description = "Address resolved", body = ApiResponse<AddressResponse>),
        (status = 400, description = "Coordinates out of range"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "location"
)]
pub async fn get_address(
    _user: AuthenticatedUser,
    State(state): State<LocationState>,
    Query(query): Query<AddressQuery>,
) -> Result<Json<ApiResponse<AddressResponse>>> {
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let address = state
        .geocoding_service
        .reverse_geocode(query.lat, query.lng)
        .await;

    Ok(Json(ApiResponse::success(
        Some(address),
        Some("Address resolved successfully".to_string()),
        None,
    )))
}

/// Resolve the caller's position through the configured provider
#[utoipa::path(
    get,
    path = "/api/location/position",
    params(PositionQuery),
    responses(
        (status = 200, description = "Position resolved", body = ApiResponse<ResolvedLocation>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Location permission denied"),
        (status = 502, description = "Position provider unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "location"
)]
pub async fn get_position(
    _user: AuthenticatedUser,
    State(state): State<LocationState>,
    Query(query): Query<PositionQuery>,
) -> Result<Json<ApiResponse<ResolvedLocation>>> {
    let location = match query.mode {
        PositionMode::Precise => state.location_service.resolve_precise().await?,
        PositionMode::Quick => state.location_service.resolve_quick().await,
    };

    Ok(Json(ApiResponse::success(
        Some(location),
        Some("Position resolved successfully".to_string()),
        None,
    )))
}
