//! HTTP handlers for monitoring endpoints.

use axum::extract::{Json, State};

use crate::adapters::websocket::RelayState;

use super::dto::{HealthResponse, RoomsResponse};

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// GET /api/rooms
pub async fn list_rooms(State(state): State<RelayState>) -> Json<RoomsResponse> {
    Json(state.registry.room_stats().await.into())
}
