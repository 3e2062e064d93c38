//! # Application Configuration
//!
//! [`ApplicationConfig`] is read from YAML, TOML or JSON (chosen by file
//! extension) and then overridden by environment variables:
//!
//! - `CTRLR_BASE_PATH` - prefix joined in front of every controller's routes
//! - `CTRLR_DUMP_ROUTES` - log the routing table once the application starts
//! - `CTRLR_LOG_*` - see [`crate::logging`]
//!
//! ```yaml
//! rest:
//!   base_path: /api
//!   dump_routes_on_start: true
//! log:
//!   level: debug
//!   format: pretty
//! ```

use crate::logging::LogConfig;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// REST layer settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RestConfig {
    /// Joined in front of each controller's own `basePath`.
    pub base_path: Option<String>,
    pub dump_routes_on_start: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    pub rest: RestConfig,
    pub log: LogConfig,
}

impl ApplicationConfig {
    /// Parse `path` according to its extension (`yaml`/`yml`, `toml`, `json`).
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let config = match extension.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid YAML config {}", path.display()))?,
            "toml" => toml::from_str(&content)
                .with_context(|| format!("Invalid TOML config {}", path.display()))?,
            "json" => serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON config {}", path.display()))?,
            other => bail!("Unsupported config format '{other}' for {}", path.display()),
        };
        Ok(config)
    }

    /// Defaults overridden by the environment.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// [`load`](Self::load) when a path is given, else defaults; environment
    /// overrides apply in both cases.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply `CTRLR_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_path) = lookup("CTRLR_BASE_PATH") {
            self.rest.base_path = Some(base_path);
        }
        if let Some(dump) = lookup("CTRLR_DUMP_ROUTES").and_then(|s| s.parse().ok()) {
            self.rest.dump_routes_on_start = dump;
        }
        self.log.apply_overrides(lookup);
    }
}
