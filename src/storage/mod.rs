//! Persistence collaborator: the snapshot shape and the store abstraction.

pub mod json_backend;

use serde::{Deserialize, Serialize};

use crate::{
    errors::PersistenceError,
    ledger::{Filter, GlobalData, MonthlyData, Transaction},
};

pub use json_backend::JsonSnapshotStore;

pub type Result<T> = std::result::Result<T, PersistenceError>;

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Everything needed to rebuild a ledger engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default = "LedgerSnapshot::schema_version_default")]
    pub schema_version: u8,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub filter: Filter,
    #[serde(default)]
    pub monthly: MonthlyData,
    #[serde(default)]
    pub global: GlobalData,
}

impl LedgerSnapshot {
    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    pub fn ensure_supported(&self) -> Result<()> {
        if self.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(PersistenceError::UnsupportedSchema {
                found: self.schema_version,
                supported: CURRENT_SCHEMA_VERSION,
            });
        }
        Ok(())
    }
}

impl Default for LedgerSnapshot {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            transactions: Vec::new(),
            filter: Filter::default(),
            monthly: MonthlyData::default(),
            global: GlobalData::default(),
        }
    }
}

/// Abstraction over backends able to persist a ledger snapshot.
pub trait SnapshotStore: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<LedgerSnapshot>>;
    fn save(&self, snapshot: &LedgerSnapshot) -> Result<()>;
}
