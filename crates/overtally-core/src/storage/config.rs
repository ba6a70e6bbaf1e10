//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Deferred-effect timing (confirmation and auto-reset delays)
//! - Feedback preferences (sound on/off)
//! - Scoreboard display settings
//!
//! Configuration is stored at `~/.config/overtally/config.toml`. Match
//! state itself is never persisted; the file holds presentation settings
//! only.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::over::ResetDelays;

/// Deferred-effect timing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Delay before the completion confirmation fires, in milliseconds.
    #[serde(default = "default_confirmation_ms")]
    pub confirmation_ms: u64,
    /// Delay before the automatic reset fires, in milliseconds.
    #[serde(default = "default_auto_reset_ms")]
    pub auto_reset_ms: u64,
}

/// Feedback configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub sound: bool,
}

/// Display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_log_separator")]
    pub log_separator: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/overtally/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub feedback: FeedbackConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

// Default functions
fn default_confirmation_ms() -> u64 {
    1_000
}
fn default_auto_reset_ms() -> u64 {
    3_000
}
fn default_true() -> bool {
    true
}
fn default_log_separator() -> String {
    " ".to_string()
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            confirmation_ms: default_confirmation_ms(),
            auto_reset_ms: default_auto_reset_ms(),
        }
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            sound: default_true(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            log_separator: default_log_separator(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            feedback: FeedbackConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    /// Path of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be resolved.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    /// Load from an explicit path, writing defaults if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content)
                .map_err(|e| ConfigError::ParseFailed(e.to_string())),
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to
    /// disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        self.save_to(&path)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Deferred-effect delays for the tracker.
    pub fn delays(&self) -> ResetDelays {
        ResetDelays {
            confirmation_ms: self.timing.confirmation_ms,
            auto_reset_ms: self.timing.auto_reset_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.timing.confirmation_ms, 1_000);
        assert_eq!(parsed.timing.auto_reset_ms, 3_000);
        assert!(parsed.feedback.enabled);
        assert_eq!(parsed.display.log_separator, " ");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: Config = toml::from_str("[timing]\nauto_reset_ms = 5000\n").unwrap();
        assert_eq!(cfg.timing.auto_reset_ms, 5_000);
        assert_eq!(cfg.timing.confirmation_ms, 1_000);
        assert!(cfg.feedback.sound);
    }

    #[test]
    fn save_and_load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.feedback.sound = false;
        cfg.timing.auto_reset_ms = 4_500;
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(!loaded.feedback.sound);
        assert_eq!(loaded.timing.auto_reset_ms, 4_500);
    }

    #[test]
    fn load_from_missing_path_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.timing.confirmation_ms, 1_000);
        assert!(path.exists());
    }

    #[test]
    fn delays_mirror_timing_section() {
        let mut cfg = Config::default();
        cfg.timing.confirmation_ms = 250;
        cfg.timing.auto_reset_ms = 750;
        let delays = cfg.delays();
        assert_eq!(delays.confirmation_ms, 250);
        assert_eq!(delays.auto_reset_ms, 750);
    }
}
