use std::{
    fs,
    path::{Path, PathBuf},
};

use super::{LedgerSnapshot, Result, SnapshotStore};
use crate::utils::write_atomic;

/// Stores the snapshot as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn load(&self) -> Result<Option<LedgerSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        let snapshot: LedgerSnapshot = serde_json::from_str(&data)?;
        snapshot.ensure_supported()?;
        tracing::info!(
            path = %self.path.display(),
            transactions = snapshot.transactions.len(),
            "ledger snapshot loaded"
        );
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshot)?;
        write_atomic(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), "ledger snapshot saved");
        Ok(())
    }
}
