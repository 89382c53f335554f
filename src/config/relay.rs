//! Relay configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MAX_SEND_TIMEOUT_MS: u64 = 60_000;

/// Fan-out tuning
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// How long one subscriber may take to accept a frame before it is evicted.
    ///
    /// An ingest connection waits for each broadcast to finish before reading
    /// its next unit, so a stalled subscriber delays its room's producer by at
    /// most this long, once. After that it is gone from the room.
    #[serde(default = "default_send_timeout_ms")]
    pub send_timeout_ms: u64,

    /// Largest WebSocket message accepted from an audience subscriber
    #[serde(default = "default_max_message_bytes")]
    pub max_message_bytes: usize,

    /// Largest unit accepted on a producer ingest connection
    #[serde(default = "default_max_ingest_message_bytes")]
    pub max_ingest_message_bytes: usize,
}

impl RelayConfig {
    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }

    /// Validate relay configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.send_timeout_ms == 0 || self.send_timeout_ms > MAX_SEND_TIMEOUT_MS {
            return Err(ValidationError::InvalidSendTimeout);
        }
        if self.max_message_bytes == 0 || self.max_ingest_message_bytes == 0 {
            return Err(ValidationError::InvalidMessageSize);
        }
        Ok(())
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            send_timeout_ms: default_send_timeout_ms(),
            max_message_bytes: default_max_message_bytes(),
            max_ingest_message_bytes: default_max_ingest_message_bytes(),
        }
    }
}

fn default_send_timeout_ms() -> u64 {
    5_000
}

fn default_max_message_bytes() -> usize {
    4 * 1024 * 1024
}

fn default_max_ingest_message_bytes() -> usize {
    64 * 1024 * 1024
}
