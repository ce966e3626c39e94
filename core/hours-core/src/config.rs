//! Tracker preferences.
//!
//! The host owns these values; the core only reads them. They are passed into
//! every tick rather than held in a global.

use std::path::Path;

use fs_err as fs;
use serde::{Deserialize, Serialize};

use crate::day::MAX_RESET_HOUR;
use crate::error::{Result, WorkHoursError};
use crate::storage::StorageConfig;

pub const DEFAULT_IGNORE_TIME_INTERVAL: f64 = 60.0;
pub const MIN_IGNORE_TIME_INTERVAL: f64 = 1.0;
pub const MAX_IGNORE_TIME_INTERVAL: f64 = 9999.0;
pub const DEFAULT_RESET_HOUR: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct TrackerConfig {
    /// Gaps between ticks at or above this many seconds count as time away.
    #[serde(default = "default_ignore_time_interval")]
    pub ignore_time_interval: f64,
    /// Local hour at which a new work day begins.
    #[serde(default = "default_reset_hour")]
    pub reset_hour: u32,
}

fn default_ignore_time_interval() -> f64 {
    DEFAULT_IGNORE_TIME_INTERVAL
}

fn default_reset_hour() -> u32 {
    DEFAULT_RESET_HOUR
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            ignore_time_interval: DEFAULT_IGNORE_TIME_INTERVAL,
            reset_hour: DEFAULT_RESET_HOUR,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_IGNORE_TIME_INTERVAL..=MAX_IGNORE_TIME_INTERVAL)
            .contains(&self.ignore_time_interval)
        {
            return Err(WorkHoursError::ConfigOutOfRange {
                field: "ignore_time_interval",
                value: self.ignore_time_interval,
                expected: "1..=9999 seconds",
            });
        }
        if self.reset_hour > MAX_RESET_HOUR {
            return Err(WorkHoursError::ConfigOutOfRange {
                field: "reset_hour",
                value: f64::from(self.reset_hour),
                expected: "0..=24 hours",
            });
        }
        Ok(())
    }
}

/// Reads and validates a config file. `Ok(None)` if the file does not exist.
pub fn read_tracker_config(path: &Path) -> Result<Option<TrackerConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content =
        fs::read_to_string(path).map_err(|e| WorkHoursError::io("Failed to read config", e))?;
    let config: TrackerConfig =
        serde_json::from_str(&content).map_err(|e| WorkHoursError::ConfigMalformed {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
    config.validate()?;
    Ok(Some(config))
}

/// Loads preferences, returning defaults if the file is missing or invalid.
pub fn load_tracker_config(storage: &StorageConfig) -> TrackerConfig {
    match read_tracker_config(&storage.config_file()) {
        Ok(Some(config)) => config,
        Ok(None) => TrackerConfig::default(),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring tracker config, using defaults");
            TrackerConfig::default()
        }
    }
}

/// Validates and saves preferences.
pub fn save_tracker_config(storage: &StorageConfig, config: &TrackerConfig) -> Result<()> {
    config.validate()?;

    let path = storage.config_file();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| WorkHoursError::io("Failed to create config directory", e))?;
    }
    let content = serde_json::to_string_pretty(config).map_err(|e| WorkHoursError::Json {
        context: "Failed to serialize config".to_string(),
        source: e,
    })?;
    fs::write(&path, content).map_err(|e| WorkHoursError::io("Failed to write config", e))
}
