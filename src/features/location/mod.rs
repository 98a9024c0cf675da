//! Location feature
//!
//! Position resolution through an optional provider, with timeout and
//! fallback policies, plus Nominatim reverse geocoding.

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;
