//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the relay core to the network:
//! - `websocket` - Subscriber and producer endpoints, in-memory room registry
//! - `http` - Monitoring endpoints, static client, router composition

pub mod http;
pub mod websocket;

pub use self::http::app_router;
pub use self::websocket::{InMemoryRoomRegistry, RelayState};
