//! Application configuration.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working setup. Log levels are not configured here; use `RUST_LOG`.
//!
//! ```toml
//! profile_url = "https://api.github.com/users/sankitdev"
//! tick_interval_ms = 1000
//! route_set = "canonical"     # or "profile_only"
//! channel_capacity = 32       # request queue per component host
//! ```

use std::path::Path;
use std::time::Duration;

use component_framework::host::DEFAULT_BUFFER;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_PROFILE_URL: &str = "https://api.github.com/users/sankitdev";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Which route table to serve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteSet {
    /// `/` with `/about`, `/contact` and `/profile`.
    #[default]
    Canonical,
    /// The earlier single-route layout: `/` with `/profile` only.
    ProfileOnly,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub profile_url: String,
    pub tick_interval_ms: u64,
    pub route_set: RouteSet,
    pub channel_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile_url: DEFAULT_PROFILE_URL.to_string(),
            tick_interval_ms: 1000,
            route_set: RouteSet::Canonical,
            channel_capacity: DEFAULT_BUFFER,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Like [`AppConfig::load`], but a missing file means defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Timer period. Zero is clamped to one millisecond.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}
