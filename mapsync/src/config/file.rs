//! Parsing `config.json` from text or from disk.

use std::path::Path;

use thiserror::Error;

use super::types::AppConfig;
use crate::platform::PlatformError;

/// Errors reading the config document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document could not be fetched from the host.
    #[error("Failed to fetch config document {url}: {source}")]
    Fetch {
        url: String,
        source: PlatformError,
    },

    /// Could not read the file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Document is not a valid `AppConfig`.
    #[error("Invalid config document: {0}")]
    Parse(#[from] serde_json::Error),
}

impl AppConfig {
    /// Parse a config document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse a config document from raw response bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Load a config document from a local file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }
}
