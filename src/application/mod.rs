//! Application layer - Handlers.
//!
//! This layer orchestrates relay operations and coordinates between ports.

pub mod handlers;

pub use handlers::{BroadcastHandler, BroadcastReport};
