// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatcher configuration
//!
//! ```toml
//! log_path = "var/event.log"
//! ```

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Log destination used when nothing else is configured
pub const DEFAULT_LOG_FILE: &str = "event.log";

/// Environment variable that overrides the configured log destination
pub const LOG_FILE_ENV: &str = "EVENTBUS_LOG_FILE";

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Settings for a dispatcher instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Append-only destination for log batches
    pub log_path: PathBuf,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl DispatcherConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Apply `EVENTBUS_LOG_FILE` if it is set and non-empty
    pub fn with_env_overrides(self) -> Self {
        self.with_log_override(std::env::var(LOG_FILE_ENV).ok())
    }

    fn with_log_override(mut self, value: Option<String>) -> Self {
        if let Some(path) = value.filter(|v| !v.is_empty()) {
            self.log_path = PathBuf::from(path);
        }
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
