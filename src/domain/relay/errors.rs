//! Relay error types.

use thiserror::Error;

/// Errors raised while turning producer input into payloads.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Undecodable structured payload: {0}")]
    Decode(#[from] serde_json::Error),
}
