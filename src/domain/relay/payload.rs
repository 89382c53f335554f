//! Payload types carried through rooms.
//!
//! The relay never interprets what it forwards. A [`StructuredMessage`] is
//! checked to be valid JSON and then sent exactly as the producer wrote it.
//! An [`AudioFrame`] is passed through untouched.

use std::sync::Arc;

use bytes::Bytes;
use serde_json::Value;

use super::{Plane, RelayError};

/// One structured translation segment from the producer.
///
/// Typically an object carrying `segment`, `source`, `lang` and `ts`, but
/// any JSON value is accepted. The producer's text is kept verbatim, so key
/// order, whitespace and number precision reach subscribers unchanged.
#[derive(Debug, Clone)]
pub struct StructuredMessage {
    value: Arc<Value>,
    encoded: Arc<str>,
}

impl StructuredMessage {
    /// Decode a producer text unit.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Decode`] if the text is not valid JSON.
    pub fn parse(text: impl Into<Arc<str>>) -> Result<Self, RelayError> {
        let encoded: Arc<str> = text.into();
        let value: Value = serde_json::from_str(&encoded)?;
        Ok(Self {
            value: Arc::new(value),
            encoded,
        })
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The JSON text sent to subscribers, as received.
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// The `lang` field the producer put in the message, if any.
    pub fn declared_language(&self) -> Option<&str> {
        self.value.get("lang").and_then(Value::as_str)
    }
}

impl PartialEq for StructuredMessage {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// One opaque audio chunk. Cloning shares the underlying buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFrame(Bytes);

impl AudioFrame {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

}

impl From<Vec<u8>> for AudioFrame {
    fn from(v: Vec<u8>) -> Self {
        Self(Bytes::from(v))
    }
}

/// Something to fan out. The variant decides the plane.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(StructuredMessage),
    Audio(AudioFrame),
}

impl Payload {
    pub fn plane(&self) -> Plane {
        match self {
            Payload::Text(_) => Plane::Text,
            Payload::Audio(_) => Plane::Audio,
        }
    }

    /// Size on the wire, for logging.
    pub fn wire_len(&self) -> usize {
        match self {
            Payload::Text(msg) => msg.encoded().len(),
            Payload::Audio(frame) => frame.len(),
        }
    }
}

impl From<StructuredMessage> for Payload {
    fn from(msg: StructuredMessage) -> Self {
        Payload::Text(msg)
    }
}

impl From<AudioFrame> for Payload {
    fn from(frame: AudioFrame) -> Self {
        Payload::Audio(frame)
    }
}
