//! Application configuration loaded from a TOML file.
//!
//! ```toml
//! log_level = "debug"
//! log_file = "billcut.log"
//! log_stderr = false
//! ```
//!
//! Every key is optional. Command-line flags take precedence over the file.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while reading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Logging and front-end settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// `EnvFilter` directive, e.g. `"info"` or `"cut_core=debug"`.
    pub log_level: Option<String>,

    /// File that log records are appended to. No file logging when unset.
    pub log_file: Option<PathBuf>,

    /// Whether log records are also written to stderr.
    pub log_stderr: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            log_file: None,
            log_stderr: true,
        }
    }
}

impl AppConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    /// Load configuration from `path`, or the defaults when no path is given.
    ///
    /// An explicitly given path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Apply a `--log-level` flag over the file's value.
    pub fn with_log_level_override(
        mut self,
        level: Option<String>,
    ) -> Self {
        if level.is_some() {
            self.log_level = level;
        }
        self
    }
}
