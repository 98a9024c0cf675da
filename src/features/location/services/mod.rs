pub mod geocoding_service;
pub mod location_service;

pub use geocoding_service::GeocodingService;
pub use location_service::{LocationService, PositionError, ResolvedLocation};
