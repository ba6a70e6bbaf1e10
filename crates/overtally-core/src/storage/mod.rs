mod config;

pub use config::{Config, DisplayConfig, FeedbackConfig, TimingConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/overtally[-dev]/` based on OVERTALLY_ENV.
///
/// Set OVERTALLY_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("OVERTALLY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("overtally-dev")
    } else {
        base_dir.join("overtally")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(e.to_string()))?;
    Ok(dir)
}
