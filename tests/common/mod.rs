#![allow(dead_code)]

use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use chrono::NaiveDate;
use ledger_core::{
    config::LedgerConfig,
    core::{FixedClock, LedgerEngine},
    errors::PersistenceError,
    ledger::{Amount, Transaction},
    storage::{LedgerSnapshot, SnapshotStore},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated data directory for one test.
pub fn test_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn today() -> NaiveDate {
    date(2024, 5, 20)
}

pub fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(today()))
}

pub fn engine_with(clock: Arc<FixedClock>) -> LedgerEngine {
    LedgerEngine::new(clock, &LedgerConfig::default())
}

pub fn engine() -> LedgerEngine {
    engine_with(clock())
}

pub fn expense(name: &str, amount: f64, on: NaiveDate, category: &str) -> Transaction {
    Transaction::new(name, Amount::expense(amount).expect("amount"), on, "", category)
}

pub fn income(name: &str, amount: f64, on: NaiveDate, category: &str) -> Transaction {
    Transaction::new(name, Amount::income(amount).expect("amount"), on, "", category)
}

pub fn signed_sum<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> f64 {
    let cents: i64 = transactions
        .into_iter()
        .map(|t| (t.amount().signed() * 100.0).round() as i64)
        .sum();
    cents as f64 / 100.0
}

pub fn assert_money_eq(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.005,
        "expected {expected:.2}, got {actual:.2}"
    );
}

/// In-memory store whose saves can be switched to fail. Clones share state,
/// so a test can keep a handle after boxing one into a session.
#[derive(Clone, Default)]
pub struct ToggleStore {
    saved: Arc<Mutex<Option<LedgerSnapshot>>>,
    fail: Arc<AtomicBool>,
}

impl ToggleStore {
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn saved(&self) -> Option<LedgerSnapshot> {
        self.saved.lock().expect("lock saved").clone()
    }
}

impl SnapshotStore for ToggleStore {
    fn load(&self) -> Result<Option<LedgerSnapshot>, PersistenceError> {
        Ok(self.saved.lock().expect("lock saved").clone())
    }

    fn save(&self, snapshot: &LedgerSnapshot) -> Result<(), PersistenceError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PersistenceError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "disk is read-only",
            )));
        }
        *self.saved.lock().expect("lock saved") = Some(snapshot.clone());
        Ok(())
    }
}
