//! CLI settings file
//!
//! Optional TOML file tuning the engine:
//!
//! ```toml
//! [engine]
//! max_combinations = 5000
//! max_depth = 128
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use pmx_core::EngineConfig;
use serde::Deserialize;

/// Settings error types
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("cannot read settings {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    InvalidToml(#[from] toml::de::Error),
}

/// Contents of a settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Engine limits
    pub engine: EngineConfig,
}

impl Settings {
    /// Parse settings from TOML text
    ///
    /// # Errors
    /// Returns error if the TOML is invalid or has unknown keys
    pub fn from_toml(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }

    /// Load settings from `path`, or defaults when no path is given
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Apply command-line overrides
    #[must_use]
    pub fn with_max_combinations(mut self, limit: Option<usize>) -> Self {
        if let Some(limit) = limit {
            self.engine.max_combinations = limit;
        }
        self
    }
}
