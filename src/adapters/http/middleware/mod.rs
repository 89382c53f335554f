//! HTTP middleware for axum.
//!
//! This module contains middleware layers for cross-cutting concerns:
//!
//! - `cors` - Cross-origin policy built from server configuration

pub mod cors;

pub use cors::cors_layer;
