//! Plane enum - the two independent broadcast channels per language.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of payload a room carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plane {
    /// Structured translation segments, sent as JSON text frames.
    Text,
    /// Raw audio chunks, sent as binary frames.
    Audio,
}

impl Plane {
    /// Lowercase wire name used in routes and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Plane::Text => "text",
            Plane::Audio => "audio",
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
