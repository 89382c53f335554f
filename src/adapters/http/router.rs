//! Top-level application router.
//!
//! Composes the WebSocket relay, monitoring endpoints and the static
//! audience client into a single axum service.

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::adapters::websocket::{relay_router, RelayState};
use crate::config::AppConfig;

use super::middleware::cors_layer;
use super::monitoring::monitoring_routes;

/// Build the full HTTP surface of the relay.
///
/// # Routes
///
/// - `/ws/...` - Relay WebSocket endpoints
/// - `GET /health`, `GET /api/rooms` - Monitoring
/// - `GET /` and `GET /static/*` - Audience client, when enabled
pub fn app_router(state: RelayState, config: &AppConfig) -> Router {
    let mut router = relay_router()
        .merge(monitoring_routes())
        .with_state(state);

    if config.frontend.enabled {
        tracing::debug!(dir = %config.frontend.dir.display(), "Serving audience client");
        router = router
            .route_service("/", ServeFile::new(config.frontend.index_file()))
            .nest_service("/static", ServeDir::new(&config.frontend.dir));
    }

    router
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http())
}
