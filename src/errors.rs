use thiserror::Error;

/// Error type for rejected ledger commands. None of these leave partial state behind.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LedgerError {
    #[error("This transaction already exists in the ledger: {0}")]
    DuplicateTransaction(String),
    #[error("Transaction not found: {0}")]
    NotFound(String),
    #[error("A filter needs at least a category or a date")]
    InvalidFilterState,
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),
}

/// Failures reported by snapshot stores.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("ledger snapshot schema v{found} is newer than supported v{supported}")]
    UnsupportedSchema { found: u8, supported: u8 },
}

/// Errors surfaced by [`crate::core::session::LedgerSession`].
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("Could not save data to file: {0}")]
    Save(#[source] PersistenceError),
    #[error("Could not load data from file: {0}")]
    Load(#[source] PersistenceError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
