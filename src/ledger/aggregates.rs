//! Monthly and lifetime aggregates plus the incremental update rule that keeps
//! them in step with the transaction store.

use std::collections::VecDeque;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{amount::round_money, transaction::Transaction};

/// Income and expense totals for transactions dated in the current month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyData {
    pub income: f64,
    pub expense: f64,
}

impl MonthlyData {
    pub fn new(income: f64, expense: f64) -> Self {
        Self { income, expense }
    }

    pub fn net(&self) -> f64 {
        round_money(self.income - self.expense)
    }
}

/// Lifetime balance and the most recently recorded recurring transactions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalData {
    pub total_balance: f64,
    #[serde(default)]
    recent_transactions: VecDeque<Transaction>,
}

impl GlobalData {
    pub fn new(total_balance: f64, recent: impl IntoIterator<Item = Transaction>) -> Self {
        Self {
            total_balance,
            recent_transactions: recent.into_iter().collect(),
        }
    }

    /// Most-recent-first.
    pub fn recent_transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.recent_transactions.iter()
    }

    pub fn recent_len(&self) -> usize {
        self.recent_transactions.len()
    }

    /// Pushes `transaction` to the front, evicting the oldest entries beyond `capacity`.
    pub fn record_recent(&mut self, transaction: Transaction, capacity: usize) {
        self.recent_transactions.push_front(transaction);
        self.truncate_recent(capacity);
    }

    pub fn truncate_recent(&mut self, capacity: usize) {
        self.recent_transactions.truncate(capacity);
    }

    pub fn clear_recent(&mut self) {
        self.recent_transactions.clear();
    }
}

/// Whether a transaction's contribution is being applied or reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Apply,
    Reverse,
}

impl Direction {
    fn factor(self) -> f64 {
        match self {
            Direction::Apply => 1.0,
            Direction::Reverse => -1.0,
        }
    }
}

/// The numeric state touched by store mutations.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aggregates {
    pub monthly: MonthlyData,
    pub total_balance: f64,
}

impl Aggregates {
    /// Full recomputation over `transactions`, scoped to the month of `today`.
    pub fn from_transactions<'a, I>(transactions: I, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .fold(Aggregates::default(), |acc, txn| {
                apply_delta(acc, txn, Direction::Apply, today)
            })
    }
}

/// Applies or reverses `transaction`'s contribution.
///
/// The balance always moves by the signed amount. The monthly pair only moves
/// when the transaction is dated in the month of `today`: income transactions
/// shift `income`, expense transactions shift `expense`, each by the magnitude
/// in the given direction.
pub fn apply_delta(
    aggregates: Aggregates,
    transaction: &Transaction,
    direction: Direction,
    today: NaiveDate,
) -> Aggregates {
    let amount = transaction.amount();
    let factor = direction.factor();
    let mut next = aggregates;

    next.total_balance = round_money(next.total_balance + factor * amount.signed());

    if transaction.falls_in_month_of(today) {
        let delta = factor * amount.magnitude();
        if amount.is_income() {
            next.monthly.income = round_money(next.monthly.income + delta);
        } else {
            next.monthly.expense = round_money(next.monthly.expense + delta);
        }
    }
    next
}
