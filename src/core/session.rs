use std::sync::Arc;

use tracing::{info, warn};

use super::{
    engine::{EngineResult, LedgerEngine},
    time::Clock,
};
use crate::{
    config::{LedgerConfig, PersistMode},
    errors::SessionError,
    ledger::{CategoryPredicate, DateMonthPredicate, Filter, Transaction, ViewMode},
    storage::SnapshotStore,
};

pub type SessionResult<T> = Result<T, SessionError>;

/// Facade that pairs the engine with a snapshot store and saves after every
/// successful mutation.
pub struct LedgerSession {
    engine: LedgerEngine,
    store: Box<dyn SnapshotStore>,
    mode: PersistMode,
}

impl LedgerSession {
    pub fn new(engine: LedgerEngine, store: Box<dyn SnapshotStore>, mode: PersistMode) -> Self {
        Self {
            engine,
            store,
            mode,
        }
    }

    /// Restores the stored snapshot, or starts an empty ledger when none exists.
    pub fn open(
        store: Box<dyn SnapshotStore>,
        clock: Arc<dyn Clock>,
        config: &LedgerConfig,
    ) -> SessionResult<Self> {
        let engine = match store.load().map_err(SessionError::Load)? {
            Some(snapshot) => LedgerEngine::from_snapshot(snapshot, clock, config),
            None => {
                info!("no stored ledger found, starting empty");
                LedgerEngine::new(clock, config)
            }
        };
        Ok(Self::new(engine, store, config.persist_mode))
    }

    pub fn engine(&self) -> &LedgerEngine {
        &self.engine
    }

    pub fn mode(&self) -> PersistMode {
        self.mode
    }

    pub fn add(&mut self, transaction: Transaction) -> SessionResult<()> {
        self.commit(|engine| engine.add(transaction))
    }

    pub fn remove(&mut self, target: &Transaction) -> SessionResult<Transaction> {
        self.commit(|engine| engine.remove(target))
    }

    pub fn replace(
        &mut self,
        target: &Transaction,
        replacement: Transaction,
    ) -> SessionResult<Transaction> {
        self.commit(|engine| engine.replace(target, replacement))
    }

    pub fn remove_at_visible(&mut self, index: usize) -> SessionResult<Transaction> {
        self.commit(|engine| engine.remove_at_visible(index))
    }

    pub fn replace_at_visible(
        &mut self,
        index: usize,
        replacement: Transaction,
    ) -> SessionResult<Transaction> {
        self.commit(|engine| engine.replace_at_visible(index, replacement))
    }

    pub fn filter(
        &mut self,
        category: Option<CategoryPredicate>,
        date_month: Option<DateMonthPredicate>,
    ) -> SessionResult<()> {
        self.commit(|engine| engine.filter(category, date_month))
    }

    pub fn set_filter(&mut self, filter: Filter) -> SessionResult<()> {
        self.commit(|engine| {
            engine.set_filter(filter);
            Ok(())
        })
    }

    pub fn clear_filter(&mut self) -> SessionResult<()> {
        self.commit(|engine| {
            engine.clear_filter();
            Ok(())
        })
    }

    pub fn record_recurring(&mut self, transaction: Transaction) -> SessionResult<()> {
        self.commit(|engine| {
            engine.record_recurring(transaction);
            Ok(())
        })
    }

    pub fn clear_recurring(&mut self) -> SessionResult<()> {
        self.commit(|engine| {
            engine.clear_recurring();
            Ok(())
        })
    }

    /// Display mode is not part of the snapshot, so nothing is saved.
    pub fn toggle_view(&mut self) -> ViewMode {
        self.engine.toggle_view()
    }

    pub fn save(&self) -> SessionResult<()> {
        self.store
            .save(&self.engine.snapshot())
            .map_err(SessionError::Save)
    }

    fn commit<T, F>(&mut self, operation: F) -> SessionResult<T>
    where
        F: FnOnce(&mut LedgerEngine) -> EngineResult<T>,
    {
        let checkpoint = match self.mode {
            PersistMode::Transactional => Some(self.engine.clone()),
            PersistMode::WriteAfterMutate => None,
        };
        let value = operation(&mut self.engine)?;

        if let Err(err) = self.store.save(&self.engine.snapshot()) {
            match checkpoint {
                Some(previous) => {
                    warn!(error = %err, "save failed, rolling back in-memory change");
                    self.engine = previous;
                }
                None => {
                    warn!(error = %err, "save failed, in-memory change kept");
                }
            }
            return Err(SessionError::Save(err));
        }
        Ok(value)
    }
}
