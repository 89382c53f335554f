//! Room key - the (plane, language) pair a subscriber joins.

use serde::Serialize;
use std::fmt;

use super::{LanguageKey, Plane};

/// Identifies one broadcast room.
///
/// Text and audio rooms for the same language are distinct keys and never
/// share members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RoomKey {
    pub plane: Plane,
    pub language: LanguageKey,
}

impl RoomKey {
    pub fn new(plane: Plane, language: impl Into<LanguageKey>) -> Self {
        Self {
            plane,
            language: language.into(),
        }
    }

    pub fn text(language: impl Into<LanguageKey>) -> Self {
        Self::new(Plane::Text, language)
    }

    pub fn audio(language: impl Into<LanguageKey>) -> Self {
        Self::new(Plane::Audio, language)
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.plane, self.language)
    }
}
