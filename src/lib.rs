//! Translation Relay - Real-time fan-out of translated speech
//!
//! This crate relays translated text segments and synthesized PCM audio from
//! a translation pipeline to audience clients. Traffic is partitioned into
//! rooms keyed by (plane, language): a producer pushing to `text/de` reaches
//! exactly the subscribers of `text/de`.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
