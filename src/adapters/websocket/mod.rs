//! WebSocket adapters for the translation relay.
//!
//! Audience clients subscribe to a (plane, language) room; the translation
//! pipeline pushes units over ingest sockets that are fanned out to that room.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │              Producer (translation pipeline)                         │
//! │   /ws/pipeline/text/de    /ws/pipeline/audio/de    ...              │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                     │
//!                                     │ one unit per frame
//!                                     ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Ingest bridge → BroadcastHandler                  │
//! │   - Decodes units for the plane                                     │
//! │   - Snapshots the room, sends to all, evicts failures               │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                     │
//!                                     │ snapshot / remove
//!                                     ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      InMemoryRoomRegistry                            │
//! │   Room: text/de        Room: audio/de       Room: text/fr           │
//! │   ├── client-a         ├── client-a'        └── client-d            │
//! │   └── client-b         └── client-c'                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`messages`] - Frame mapping between payloads and WebSocket messages
//! - [`rooms`] - In-memory room registry
//! - [`subscriber`] - WebSocket-backed subscriber with bounded sends
//! - [`handler`] - Subscriber upgrade handlers, shared state and router
//! - [`event_bridge`] - Producer ingest endpoints

pub mod event_bridge;
pub mod handler;
pub mod messages;
pub mod rooms;
pub mod subscriber;

pub use event_bridge::{ingest_audio, ingest_text, run_ingest, IngestSummary};
pub use handler::{
    ingest_path, relay_router, subscribe_audio, subscribe_path, subscribe_text, wait_for_release,
    Release, RelayState,
};
pub use messages::{decode_ingest, to_ws_message, IngestRejection, IngestUnit};
pub use rooms::InMemoryRoomRegistry;
pub use subscriber::WebSocketSubscriber;
