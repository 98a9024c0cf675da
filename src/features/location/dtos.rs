use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Query params for reverse geocoding
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
pub struct AddressQuery {
    /// Latitude in decimal degrees
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    #[param(minimum = -90.0, maximum = 90.0)]
    pub lat: f64,
    /// Longitude in decimal degrees
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    #[param(minimum = -180.0, maximum = 180.0)]
    pub lng: f64,
}

/// Human-readable address for a coordinate pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AddressResponse {
    /// Full display address, or the raw coordinates when lookup failed
    pub address: String,
    /// City, town or village; empty when unknown
    pub city: String,
    /// Country name; empty when unknown
    pub country: String,
}

/// Query params for position resolution
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PositionQuery {
    /// Resolution mode (default: precise)
    #[serde(default)]
    pub mode: PositionMode,
}

/// Which resolution variant to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PositionMode {
    /// High accuracy, long timeout; permission and availability failures
    /// surface as errors
    #[default]
    Precise,
    /// Low accuracy, short timeout; always resolves, falling back to the
    /// default coordinate
    Quick,
}
