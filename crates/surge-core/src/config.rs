//! Configuration management.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::channel::BalanceLevel;
use crate::{Error, Result};

/// Balance-level cut points, as fractions of capacity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BalanceThresholds {
    /// Below this fraction the level is [`BalanceLevel::Bad`].
    pub low: f64,
    /// At or above this fraction the level is [`BalanceLevel::Good`].
    pub high: f64,
}

impl Default for BalanceThresholds {
    fn default() -> Self {
        Self {
            low: 0.25,
            high: 0.50,
        }
    }
}

impl BalanceThresholds {
    /// Map a balance percent (0.0-1.0) to its categorical level.
    pub fn level_for(&self, percent: f64) -> BalanceLevel {
        if percent < self.low {
            BalanceLevel::Bad
        } else if percent < self.high {
            BalanceLevel::Warn
        } else {
            BalanceLevel::Good
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Seconds between channel refreshes.
    pub poll_interval_secs: u64,
    /// Balance-level thresholds.
    #[serde(default)]
    pub thresholds: BalanceThresholds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval_secs: 60,
            thresholds: BalanceThresholds::default(),
        }
    }
}

impl Config {
    /// Load configuration from disk or create default.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to disk.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get configuration file path.
    fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "surge")
            .map(|dirs| dirs.config_dir().join("config.json"))
            .ok_or_else(|| Error::Config("could not determine config directory".into()))
    }
}
