//! Console configuration
//!
//! A small JSON document; every field is optional and falls back to its
//! default. Command-line flags override what the file says.

use std::fs;
use std::path::{Path, PathBuf};

use buffer_core::INITIAL_CAPACITY;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Console configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Capacity of the buffer created at startup
    pub initial_capacity: usize,
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence
    pub log_filter: String,
    /// Print the menu before every prompt
    pub show_menu: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            initial_capacity: INITIAL_CAPACITY,
            log_filter: "info".to_string(),
            show_menu: true,
        }
    }
}

impl ConsoleConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}
