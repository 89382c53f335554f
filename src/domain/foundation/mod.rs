//! Foundation module - Shared domain primitives.
//!
//! Contains the identifier and time value objects shared by the
//! translation relay.

mod ids;
mod timestamp;

pub use ids::ConnectionId;
pub use timestamp::Timestamp;
