pub mod auth;
pub mod exports;
pub mod location;
pub mod reports;
