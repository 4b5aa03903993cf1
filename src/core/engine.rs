//! The in-memory ledger: canonical transaction store, aggregates, filter and
//! view state, kept consistent across every mutation.

use std::{fmt, sync::Arc};

use tracing::{debug, warn};

use super::time::{Clock, SystemClock};
use crate::{
    config::LedgerConfig,
    errors::LedgerError,
    ledger::{
        aggregates::{apply_delta, Aggregates, Direction, GlobalData, MonthlyData},
        filter::{CategoryPredicate, DateMonthPredicate, Filter},
        transaction::Transaction,
        view::{project, FilteredView, ToggleView, ViewMode},
    },
    storage::{LedgerSnapshot, CURRENT_SCHEMA_VERSION},
};

pub type EngineResult<T> = Result<T, LedgerError>;

/// Owns the transaction store and everything derived from it.
///
/// Not internally synchronized: callers that share an engine across threads
/// must serialize access themselves.
#[derive(Clone)]
pub struct LedgerEngine {
    transactions: Vec<Transaction>,
    visible: Vec<usize>,
    filter: Filter,
    monthly: MonthlyData,
    global: GlobalData,
    toggle: ToggleView,
    clock: Arc<dyn Clock>,
    recent_capacity: usize,
}

impl LedgerEngine {
    pub fn new(clock: Arc<dyn Clock>, config: &LedgerConfig) -> Self {
        Self {
            transactions: Vec::new(),
            visible: Vec::new(),
            filter: Filter::default(),
            monthly: MonthlyData::default(),
            global: GlobalData::default(),
            toggle: ToggleView::default(),
            clock,
            recent_capacity: config.recent_capacity,
        }
    }

    /// Engine on the wall clock with default settings.
    pub fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock), &LedgerConfig::default())
    }

    /// Restores an engine from a stored snapshot. Stored aggregates are taken
    /// as-is; call [`LedgerEngine::recompute_aggregates`] to rebuild them.
    pub fn from_snapshot(
        snapshot: LedgerSnapshot,
        clock: Arc<dyn Clock>,
        config: &LedgerConfig,
    ) -> Self {
        let LedgerSnapshot {
            transactions,
            filter,
            monthly,
            mut global,
            ..
        } = snapshot;
        global.truncate_recent(config.recent_capacity);

        let mut engine = Self {
            transactions,
            visible: Vec::new(),
            filter,
            monthly,
            global,
            toggle: ToggleView::default(),
            clock,
            recent_capacity: config.recent_capacity,
        };
        engine.refresh_view();
        engine
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            schema_version: CURRENT_SCHEMA_VERSION,
            transactions: self.transactions.clone(),
            filter: self.filter.clone(),
            monthly: self.monthly,
            global: self.global.clone(),
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// True when an entry with the same name and amount exists.
    pub fn has(&self, transaction: &Transaction) -> bool {
        self.transactions
            .iter()
            .any(|existing| existing.is_same_transaction(transaction))
    }

    pub fn add(&mut self, transaction: Transaction) -> EngineResult<()> {
        if self.has(&transaction) {
            warn!(transaction = %transaction, "rejected duplicate transaction");
            return Err(LedgerError::DuplicateTransaction(transaction.to_string()));
        }
        self.shift(&transaction, Direction::Apply);
        self.transactions.push(transaction);
        self.refresh_view();
        debug!(
            balance = self.global.total_balance,
            count = self.transactions.len(),
            "transaction added"
        );
        Ok(())
    }

    /// Removes the first entry equal to `target` and returns it.
    pub fn remove(&mut self, target: &Transaction) -> EngineResult<Transaction> {
        let position = self.position_of(target)?;
        let removed = self.transactions.remove(position);
        self.shift(&removed, Direction::Reverse);
        self.refresh_view();
        debug!(
            balance = self.global.total_balance,
            count = self.transactions.len(),
            "transaction removed"
        );
        Ok(removed)
    }

    /// Swaps `target` for `replacement` in place, moving aggregates accordingly.
    /// Returns the replaced entry.
    pub fn replace(
        &mut self,
        target: &Transaction,
        replacement: Transaction,
    ) -> EngineResult<Transaction> {
        let position = self.position_of(target)?;
        let conflict = self
            .transactions
            .iter()
            .enumerate()
            .any(|(idx, existing)| idx != position && existing.is_same_transaction(&replacement));
        if conflict {
            warn!(transaction = %replacement, "rejected edit colliding with another entry");
            return Err(LedgerError::DuplicateTransaction(replacement.to_string()));
        }

        let today = self.clock.today();
        let previous = std::mem::replace(&mut self.transactions[position], replacement);
        let reversed = apply_delta(self.aggregates(), &previous, Direction::Reverse, today);
        let applied = apply_delta(
            reversed,
            &self.transactions[position],
            Direction::Apply,
            today,
        );
        self.store_aggregates(applied);
        self.refresh_view();
        debug!(balance = self.global.total_balance, "transaction replaced");
        Ok(previous)
    }

    /// Removes the entry shown at `index` of the filtered view.
    pub fn remove_at_visible(&mut self, index: usize) -> EngineResult<Transaction> {
        let target = self.visible_entry(index)?;
        self.remove(&target)
    }

    /// Replaces the entry shown at `index` of the filtered view.
    pub fn replace_at_visible(
        &mut self,
        index: usize,
        replacement: Transaction,
    ) -> EngineResult<Transaction> {
        let target = self.visible_entry(index)?;
        self.replace(&target, replacement)
    }

    fn visible_entry(&self, index: usize) -> EngineResult<Transaction> {
        self.filtered()
            .get(index)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(format!("no transaction at index {}", index + 1)))
    }

    fn position_of(&self, target: &Transaction) -> EngineResult<usize> {
        self.transactions
            .iter()
            .position(|existing| existing == target)
            .ok_or_else(|| {
                warn!(transaction = %target, "transaction not found");
                LedgerError::NotFound(target.to_string())
            })
    }

    pub fn monthly(&self) -> &MonthlyData {
        &self.monthly
    }

    pub fn global(&self) -> &GlobalData {
        &self.global
    }

    pub fn total_balance(&self) -> f64 {
        self.global.total_balance
    }

    pub fn aggregates(&self) -> Aggregates {
        Aggregates {
            monthly: self.monthly,
            total_balance: self.global.total_balance,
        }
    }

    /// Rebuilds both aggregates from the store, scoped to today's month.
    pub fn recompute_aggregates(&mut self) {
        let rebuilt = Aggregates::from_transactions(&self.transactions, self.clock.today());
        self.store_aggregates(rebuilt);
    }

    fn shift(&mut self, transaction: &Transaction, direction: Direction) {
        let next = apply_delta(
            self.aggregates(),
            transaction,
            direction,
            self.clock.today(),
        );
        self.store_aggregates(next);
    }

    fn store_aggregates(&mut self, aggregates: Aggregates) {
        self.monthly = aggregates.monthly;
        self.global.total_balance = aggregates.total_balance;
    }

    /// Remembers `transaction` as recently recorded. Balance is untouched.
    pub fn record_recurring(&mut self, transaction: Transaction) {
        self.global
            .record_recent(transaction, self.recent_capacity);
    }

    pub fn clear_recurring(&mut self) {
        self.global.clear_recent();
    }

    pub fn filter_state(&self) -> &Filter {
        &self.filter
    }

    /// Filter command entry point: each `Some` axis replaces the current one.
    pub fn filter(
        &mut self,
        category: Option<CategoryPredicate>,
        date_month: Option<DateMonthPredicate>,
    ) -> EngineResult<()> {
        self.filter.update(category, date_month)?;
        self.refresh_view();
        debug!(visible = self.visible.len(), "filter updated");
        Ok(())
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.refresh_view();
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.refresh_view();
    }

    pub fn filtered(&self) -> FilteredView<'_> {
        FilteredView::new(&self.transactions, &self.visible)
    }

    fn refresh_view(&mut self) {
        self.visible = project(&self.transactions, &self.filter.combined());
    }

    pub fn toggle_view(&mut self) -> ViewMode {
        self.toggle.switch()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.toggle.get()
    }

    pub fn toggle(&self) -> &ToggleView {
        &self.toggle
    }
}

impl fmt::Debug for LedgerEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedgerEngine")
            .field("transactions", &self.transactions.len())
            .field("visible", &self.visible.len())
            .field("filter", &self.filter)
            .field("monthly", &self.monthly)
            .field("total_balance", &self.global.total_balance)
            .field("mode", &self.toggle.get())
            .finish_non_exhaustive()
    }
}
