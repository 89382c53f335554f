//! Subscriber port - one audience connection the relay can push to.
//!
//! The send outcome is an explicit `Result`: the broadcaster branches on it
//! to decide eviction instead of intercepting failures.

use async_trait::async_trait;

use crate::domain::foundation::ConnectionId;
use crate::domain::relay::Payload;

/// Why a send to a subscriber failed. Every variant is terminal for the
/// connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    /// The peer is gone (closed, reset, or already evicted).
    #[error("Connection closed")]
    Closed,

    /// The peer did not accept the frame within the send timeout.
    #[error("Send timed out after {0} ms")]
    TimedOut(u64),

    /// Any other transport failure.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Port for delivering payloads to a single subscribed peer.
///
/// Implementations must:
/// - Return a stable [`ConnectionId`] for the lifetime of the connection
/// - Send text payloads as structured messages and audio payloads as binary frames
/// - Never retry; one failure means the connection is dead
#[async_trait]
pub trait Subscriber: Send + Sync {
    /// Handle identity used for registry membership.
    fn connection_id(&self) -> ConnectionId;

    /// Deliver one payload.
    async fn send(&self, payload: &Payload) -> Result<(), SendError>;
}
