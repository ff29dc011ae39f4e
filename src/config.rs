//! Configuration loaded from `tablesmith.toml`.
//!
//! ```toml
//! [server]
//! url = "http://localhost:8080/api/sql"
//!
//! [generate]
//! dialect = "PostgreSQL"
//!
//! [history]
//! capacity = 100
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::client::DEFAULT_API_URL;
use crate::dialect::Dialect;
use crate::error::ConfigError;
use crate::history::DEFAULT_CAPACITY;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "tablesmith.toml";

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub generate: GenerateConfig,
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the SQL generation service.
    pub url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    pub dialect: Dialect,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl Config {
    /// Parse a TOML document. `origin` is only used in error messages.
    pub fn from_toml(content: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    /// Load a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content, &path.display().to_string())
    }

    /// Load from the first config file found, or fall back to defaults.
    pub fn discover() -> Result<Self, ConfigError> {
        match Self::search_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// `./tablesmith.toml`, then `<config dir>/tablesmith/config.toml`.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("tablesmith").join("config.toml"));
        }
        paths
    }
}
