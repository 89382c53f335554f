//! Relay domain - rooms, planes and the payloads fanned out through them.
//!
//! # Vocabulary
//!
//! ```text
//! Plane::Text  + "de"  ──►  Room text/de   (structured JSON segments)
//! Plane::Audio + "de"  ──►  Room audio/de  (opaque PCM frames)
//! ```
//!
//! A room is identified by a [`RoomKey`] and exists implicitly: an absent
//! room and an empty room both mean "zero subscribers".

mod errors;
mod language;
mod payload;
mod plane;
mod room;

pub use errors::RelayError;
pub use language::LanguageKey;
pub use payload::{AudioFrame, Payload, StructuredMessage};
pub use plane::Plane;
pub use room::RoomKey;
