//! Browser frontend configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the static audience client lives
#[derive(Debug, Clone, Deserialize)]
pub struct FrontendConfig {
    /// Serve `/` and `/static/*` from `dir`
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Directory holding `index.html` and assets
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

impl FrontendConfig {
    pub fn index_file(&self) -> PathBuf {
        self.dir.join("index.html")
    }

    /// Validate frontend configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.enabled && self.dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingFrontendDir);
        }
        Ok(())
    }
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            dir: default_dir(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_dir() -> PathBuf {
    PathBuf::from("frontend")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_lives_in_dir() {
        let config = FrontendConfig {
            dir: PathBuf::from("/srv/relay"),
            ..Default::default()
        };
        assert_eq!(config.index_file(), PathBuf::from("/srv/relay/index.html"));
    }

    #[test]
    fn empty_dir_only_matters_when_enabled() {
        let mut config = FrontendConfig {
            enabled: true,
            dir: PathBuf::new(),
        };
        assert_eq!(config.validate(), Err(ValidationError::MissingFrontendDir));

        config.enabled = false;
        assert!(config.validate().is_ok());
    }
}
