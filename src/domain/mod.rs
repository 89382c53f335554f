//! Domain layer containing relay types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `relay` - Planes, language keys, rooms and payloads

pub mod foundation;
pub mod relay;
