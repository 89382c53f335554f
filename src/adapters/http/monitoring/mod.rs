//! Monitoring HTTP adapter module.
//!
//! Read-only endpoints for health checks and room occupancy.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{HealthResponse, RoomsResponse};
pub use handlers::{health, list_rooms};
pub use routes::monitoring_routes;
