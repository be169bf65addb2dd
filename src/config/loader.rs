use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::types::Config;
use crate::storage::FileMedium;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// `~/.config/pagestate/config.toml` on Linux, or the platform
    /// equivalent via `dirs::config_dir()`. Falls back to the current
    /// directory.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("pagestate").join("config.toml")
    }

    /// Load from the default path. A missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`. A missing file yields defaults; a present one
    /// must parse and validate.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Checks:
    /// - the endpoint is an http(s) URL
    /// - timeouts, quota and item cap are non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = &self.api.endpoint;
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::ValidationError {
                message: format!("api.endpoint '{}' must be an http(s) URL", endpoint),
            });
        }

        if self.api.timeout_seconds == 0 || self.api.connect_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "api timeouts must be greater than zero".to_string(),
            });
        }

        if self.storage.quota_bytes == 0 {
            return Err(ConfigError::ValidationError {
                message: "storage.quota_bytes must be greater than zero".to_string(),
            });
        }

        if self.display.max_items == 0 {
            return Err(ConfigError::ValidationError {
                message: "display.max_items must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// The configured storage file, or the platform default.
    pub fn storage_path(&self) -> PathBuf {
        self.storage
            .path
            .clone()
            .unwrap_or_else(FileMedium::default_path)
    }
}
