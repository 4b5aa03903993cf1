#![doc(test(attr(deny(warnings))))]

//! Ledger Core keeps a personal income/expense ledger consistent: a filtered
//! view of the transactions plus current-month and lifetime aggregates that are
//! updated incrementally on every change.

pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default configuration and emits a
/// startup info log.
pub fn init() {
    init_with(&config::LedgerConfig::default());
}

/// Like [`init`], using the log directive from a loaded configuration.
///
/// Only the first call of either function installs the subscriber; later
/// calls are no-ops and their directive is ignored. `RUST_LOG` overrides the
/// directive.
pub fn init_with(config: &config::LedgerConfig) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing_with(&config.log_directive);
        tracing::info!(directive = %config.log_directive, "Ledger Core tracing initialized.");
    });
}
