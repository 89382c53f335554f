//! HTTP adapters - REST endpoints and router composition.

pub mod middleware;
pub mod monitoring;
pub mod router;

pub use monitoring::monitoring_routes;
pub use router::app_router;
