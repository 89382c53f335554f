//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `TRANSLATION_RELAY` prefix and nested values use double underscores as separators.
//! Every value has a default, so the relay starts with an empty environment.
//!
//! # Example
//!
//! ```no_run
//! use translation_relay::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Relay listening on {}", config.server.socket_addr().unwrap());
//! ```

mod error;
mod frontend;
mod relay;
mod server;

pub use error::{ConfigError, ValidationError};
pub use frontend::FrontendConfig;
pub use relay::RelayConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// Fan-out tuning (send timeout, message size)
    #[serde(default)]
    pub relay: RelayConfig,

    /// Static browser client
    #[serde(default)]
    pub frontend: FrontendConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `TRANSLATION_RELAY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `TRANSLATION_RELAY__SERVER__PORT=8000` -> `server.port = 8000`
    /// - `TRANSLATION_RELAY__RELAY__SEND_TIMEOUT_MS=2000` -> `relay.send_timeout_ms = 2000`
    /// - `TRANSLATION_RELAY__FRONTEND__DIR=/srv/frontend` -> `frontend.dir = /srv/frontend`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TRANSLATION_RELAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.relay.validate()?;
        self.frontend.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
