//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the relay core and the outside world. Adapters implement these ports.
//!
//! - `Subscriber` - One audience connection that payloads are pushed to
//! - `RoomRegistry` - Room membership keyed by (plane, language)

mod connection_registry;
mod subscriber;

pub use connection_registry::{RoomRegistry, RoomStats};
pub use subscriber::{SendError, Subscriber};
