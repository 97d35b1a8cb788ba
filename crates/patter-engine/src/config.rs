//! Configuration types for patter.
//!
//! Settings live in a small JSON file under the user's config directory.
//! Every field has a default, so a missing or partial file always yields a
//! usable configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::conversation::GREETING;

/// Main configuration for patter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Simulated reply latency in milliseconds.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// UI tick rate in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Color theme.
    #[serde(default)]
    pub theme: ThemeVariant,

    /// Assistant greeting seeded into every new conversation.
    #[serde(default = "default_greeting")]
    pub greeting: String,
}

fn default_latency_ms() -> u64 {
    1000
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_greeting() -> String {
    GREETING.into()
}

/// Color theme variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThemeVariant {
    /// Catppuccin Mocha (dark).
    #[default]
    Mocha,
    /// Catppuccin Latte (light).
    Latte,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Load configuration, falling back to defaults.
    ///
    /// A missing file is normal first-run behavior; a file that fails to
    /// parse is reported and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                Self::default()
            }
        }
    }

    /// Default config file location: `<config dir>/patter/config.json`.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("patter").join("config.json"))
    }

    /// Reply latency as a [`Duration`].
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            tick_rate_ms: default_tick_rate_ms(),
            theme: ThemeVariant::default(),
            greeting: default_greeting(),
        }
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}
