//! Axum router configuration for monitoring endpoints.

use axum::{routing::get, Router};

use crate::adapters::websocket::RelayState;

use super::handlers::{health, list_rooms};

/// Create the monitoring router.
///
/// # Routes
/// - `GET /health` - Liveness check
/// - `GET /api/rooms` - Subscriber counts per room
pub fn monitoring_routes() -> Router<RelayState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/rooms", get(list_rooms))
}
