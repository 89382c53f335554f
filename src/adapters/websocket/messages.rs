//! WebSocket frame mapping for the relay.
//!
//! Defines how payloads travel on the wire:
//! - Relay → Subscriber: text payloads as JSON text frames, audio as binary frames
//! - Producer → Relay: one frame per unit, decoded according to the ingest plane

use axum::extract::ws::Message;

use crate::domain::relay::{AudioFrame, Payload, Plane, RelayError, StructuredMessage};

// ============================================
// Relay → Subscriber
// ============================================

/// Frame sent to a subscriber for one payload.
pub fn to_ws_message(payload: &Payload) -> Message {
    match payload {
        Payload::Text(msg) => Message::Text(msg.encoded().to_string()),
        Payload::Audio(frame) => Message::Binary(frame.as_bytes().to_vec()),
    }
}

// ============================================
// Producer → Relay
// ============================================

/// What one inbound producer frame means.
#[derive(Debug)]
pub enum IngestUnit {
    /// A payload to broadcast.
    Payload(Payload),
    /// Protocol-level ping/pong; nothing to do.
    Control,
    /// The producer sent a close frame.
    Closed,
    /// The frame could not be turned into a payload; skip it.
    Rejected(IngestRejection),
}

/// Why a producer frame was skipped.
#[derive(Debug, thiserror::Error)]
pub enum IngestRejection {
    #[error(transparent)]
    Malformed(#[from] RelayError),

    #[error("{received} frame received on {plane} ingest")]
    WrongKind { plane: Plane, received: &'static str },
}

/// Decode one producer frame for the given plane.
pub fn decode_ingest(plane: Plane, message: Message) -> IngestUnit {
    match (plane, message) {
        (Plane::Text, Message::Text(text)) => match StructuredMessage::parse(text) {
            Ok(msg) => IngestUnit::Payload(Payload::Text(msg)),
            Err(e) => IngestUnit::Rejected(e.into()),
        },
        (Plane::Audio, Message::Binary(bytes)) => {
            IngestUnit::Payload(Payload::Audio(AudioFrame::from(bytes)))
        }
        (plane, Message::Text(_)) => IngestUnit::Rejected(IngestRejection::WrongKind {
            plane,
            received: "text",
        }),
        (plane, Message::Binary(_)) => IngestUnit::Rejected(IngestRejection::WrongKind {
            plane,
            received: "binary",
        }),
        (_, Message::Ping(_)) | (_, Message::Pong(_)) => IngestUnit::Control,
        (_, Message::Close(_)) => IngestUnit::Closed,
    }
}
