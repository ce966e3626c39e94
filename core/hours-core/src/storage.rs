//! Storage configuration and path management for Working Hours.
//!
//! The ledger lives beside the installed component, named after it:
//! `<root>/work_hours.ini`. Preferences sit next to it as `work_hours.json`.
//!
//! Production code uses `StorageConfig::default()`; hosts that embed the
//! library pass their own component directory, and tests use
//! `StorageConfig::with_root(temp_dir)` for isolation.

use std::path::{Path, PathBuf};

/// Base name shared by the ledger and preferences files.
pub const COMPONENT_NAME: &str = "work_hours";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    root: PathBuf,
}

impl Default for StorageConfig {
    /// Directory of the running executable, falling back to the platform data dir.
    fn default() -> Self {
        let root = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .or_else(|| dirs::data_dir().map(|d| d.join("working-hours")))
            .unwrap_or_else(|| PathBuf::from("."));
        Self { root }
    }
}

impl StorageConfig {
    /// Creates a StorageConfig with a custom root directory.
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    /// Root under the platform data directory (`~/.local/share/working-hours` on Linux).
    pub fn in_data_dir() -> Option<Self> {
        dirs::data_dir().map(|d| Self::with_root(d.join("working-hours")))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the INI ledger.
    pub fn ledger_file(&self) -> PathBuf {
        self.root.join(format!("{COMPONENT_NAME}.ini"))
    }

    /// Path to the tracker preferences.
    pub fn config_file(&self) -> PathBuf {
        self.root.join(format!("{COMPONENT_NAME}.json"))
    }

    /// Directory for rolling log files written by the hook binary.
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_named_after_component() {
        let storage = StorageConfig::with_root(PathBuf::from("/opt/addons"));
        assert_eq!(storage.ledger_file(), PathBuf::from("/opt/addons/work_hours.ini"));
        assert_eq!(storage.config_file(), PathBuf::from("/opt/addons/work_hours.json"));
        assert_eq!(storage.logs_dir(), PathBuf::from("/opt/addons/logs"));
    }

    #[test]
    fn default_root_is_not_empty() {
        let storage = StorageConfig::default();
        assert!(!storage.root().as_os_str().is_empty());
    }
}
