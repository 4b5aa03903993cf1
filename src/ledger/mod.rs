//! Ledger value types, aggregates, predicates and views.

pub mod aggregates;
pub mod amount;
pub mod filter;
pub mod transaction;
pub mod view;

pub use aggregates::{apply_delta, Aggregates, Direction, GlobalData, MonthlyData};
pub use amount::{round_money, Amount};
pub use filter::{
    CategoryPredicate, CombinedPredicate, DateMonthPredicate, Filter, TransactionPredicate,
    MATCH_ALL_KEYWORD,
};
pub use transaction::Transaction;
pub use view::{FilteredView, ToggleView, ViewMode};
