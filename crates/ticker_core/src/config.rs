//! # Engine Configuration
//!
//! ```rust
//! use ticker_core::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let reproducible = EngineConfig::deterministic(42);
//! ```
//!
//! `TICKER_CONFIG_PATH` may point at a JSON file; see [`EngineConfig::from_env`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{env, fs};

use crate::commentary::{RetryPolicy, SelectionMode};
use crate::error::{CommentaryError, Result};

pub const CONFIG_PATH_ENV: &str = "TICKER_CONFIG_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Variant selection: fresh entropy or a fixed seed.
    #[serde(default)]
    pub selection: SelectionMode,
    /// Directory with `<code>.yaml` catalogs overriding the embedded ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_dir: Option<PathBuf>,
    /// Used by [`ResilientBackend::from_config`](crate::commentary::ResilientBackend::from_config)
    /// around a hosted primary. The template engine alone never retries.
    #[serde(default)]
    pub retry: RetryPolicy,
}

impl EngineConfig {
    /// Same event, same text. Used by tests and replays.
    pub fn deterministic(seed: u64) -> Self {
        Self { selection: SelectionMode::Seeded { seed }, ..Self::default() }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CommentaryError::Config(format!("Failed to read config '{}': {e}", path.display()))
        })?;
        let config = Self::from_json(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the file named by `TICKER_CONFIG_PATH`, or returns defaults when
    /// the variable is unset or blank.
    pub fn from_env() -> Result<Self> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        tracing::info!(path, "loading engine config from {CONFIG_PATH_ENV}");
        Self::from_file(Path::new(path))
    }

    pub fn validate(&self) -> Result<()> {
        self.retry.validate().map_err(CommentaryError::Config)?;
        if let Some(dir) = &self.catalog_dir {
            if !dir.is_dir() {
                return Err(CommentaryError::Config(format!(
                    "catalog_dir '{}' is not a directory",
                    dir.display()
                )));
            }
        }
        Ok(())
    }
}
