use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    errors::ConfigError,
    utils::{app_data_dir, ensure_dir, write_atomic},
};

const CONFIG_FILE: &str = "config.json";
const DEFAULT_SNAPSHOT_FILE: &str = "ledger.json";
const DEFAULT_RECENT_CAPACITY: usize = 20;

/// How a session reacts when the store rejects a save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistMode {
    /// Keep the in-memory mutation and report the save error.
    #[default]
    WriteAfterMutate,
    /// Restore the pre-mutation state before reporting the save error.
    Transactional,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Upper bound on the recent (recurring) transaction list.
    pub recent_capacity: usize,
    pub persist_mode: PersistMode,
    /// Snapshot file name, resolved against the data directory.
    pub snapshot_file: String,
    pub log_directive: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            recent_capacity: DEFAULT_RECENT_CAPACITY,
            persist_mode: PersistMode::default(),
            snapshot_file: DEFAULT_SNAPSHOT_FILE.into(),
            log_directive: "ledger_core=info".into(),
        }
    }
}

/// Loads and stores [`LedgerConfig`] under the application data directory.
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
            base,
        })
    }

    /// Missing file means defaults; unknown keys are ignored and missing keys defaulted.
    pub fn load(&self) -> Result<LedgerConfig, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(LedgerConfig::default())
        }
    }

    pub fn save(&self, config: &LedgerConfig) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn snapshot_path(&self, config: &LedgerConfig) -> PathBuf {
        self.base.join(&config.snapshot_file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_defaults_when_file_missing() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), LedgerConfig::default());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = LedgerConfig {
            recent_capacity: 5,
            persist_mode: PersistMode::Transactional,
            snapshot_file: "household.json".into(),
            ..LedgerConfig::default()
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
        assert_eq!(
            manager.snapshot_path(&config),
            temp.path().join("household.json")
        );
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{ "persist_mode": "transactional" }"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.persist_mode, PersistMode::Transactional);
        assert_eq!(config.recent_capacity, 20);
    }
}
