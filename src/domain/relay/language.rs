//! Language key - opaque partition key for rooms.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Target language of a room, e.g. `"de"` or `"pt-BR"`.
///
/// Deliberately unvalidated: any string is a legal key and the room it
/// names is created on first use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageKey(String);

impl LanguageKey {
    /// Create a language key from any string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for LanguageKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LanguageKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for LanguageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
