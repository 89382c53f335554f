//! Application handlers.
//!
//! Handlers that orchestrate relay operations over the ports.

pub mod broadcast;

pub use broadcast::{BroadcastHandler, BroadcastReport};
