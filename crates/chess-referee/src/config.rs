//! Configuration file loading for the referee.
//!
//! Settings live in a TOML file, `referee.toml` in the working directory
//! unless `--config` names another one.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Referee settings.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RefereeConfig {
    /// Position to start from. Defaults to the standard starting position.
    #[serde(default)]
    pub start_fen: Option<String>,
    /// Log filter level ("error", "warn", "info", "debug" or "trace").
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Stop a replay at the first finished position.
    #[serde(default = "default_stop_at_terminal")]
    pub stop_at_terminal: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_stop_at_terminal() -> bool {
    true
}

impl Default for RefereeConfig {
    fn default() -> Self {
        RefereeConfig {
            start_fen: None,
            log_level: default_log_level(),
            stop_at_terminal: default_stop_at_terminal(),
        }
    }
}

impl RefereeConfig {
    /// Loads the configuration.
    ///
    /// With an explicit `path` the file must exist. Without one,
    /// [`Self::default_path()`] is used and a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read,
    /// or [`ConfigError::ParseError`] if it contains invalid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = Self::default_path();
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let content =
            std::fs::read_to_string(&config_path).map_err(|source| ConfigError::ReadError {
                path: config_path.clone(),
                source,
            })?;
        Self::parse(&content)
    }

    /// Parses configuration text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Returns `referee.toml` in the current working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("referee.toml")
    }
}
