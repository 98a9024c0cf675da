use axum::{routing::get, Router};

use super::handlers;

/// Session surface; the caller applies the auth middleware.
pub fn routes() -> Router {
    Router::new().route("/api/auth/me", get(handlers::get_me))
}
