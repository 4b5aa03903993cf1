use serde::{Deserialize, Serialize};

use super::{filter::TransactionPredicate, transaction::Transaction};

/// Positions of the store entries accepted by `predicate`, in store order.
pub fn project<P>(store: &[Transaction], predicate: &P) -> Vec<usize>
where
    P: TransactionPredicate + ?Sized,
{
    store
        .iter()
        .enumerate()
        .filter(|(_, transaction)| predicate.matches(transaction))
        .map(|(idx, _)| idx)
        .collect()
}

/// Read-only window onto the filtered slice of the transaction store.
#[derive(Debug, Clone, Copy)]
pub struct FilteredView<'a> {
    store: &'a [Transaction],
    visible: &'a [usize],
}

impl<'a> FilteredView<'a> {
    pub(crate) fn new(store: &'a [Transaction], visible: &'a [usize]) -> Self {
        Self { store, visible }
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Zero-based position within the view, as displayed.
    pub fn get(&self, index: usize) -> Option<&'a Transaction> {
        self.visible.get(index).map(|&idx| &self.store[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Transaction> + 'a {
        let store = self.store;
        let visible = self.visible;
        visible.iter().map(move |&idx| &store[idx])
    }

    pub fn to_vec(&self) -> Vec<Transaction> {
        self.iter().cloned().collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    List,
    Chart,
}

/// List/chart display toggle. Independent of filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToggleView {
    mode: ViewMode,
}

impl ToggleView {
    pub fn get(&self) -> ViewMode {
        self.mode
    }

    pub fn is_list_mode(&self) -> bool {
        self.mode == ViewMode::List
    }

    pub fn switch(&mut self) -> ViewMode {
        self.mode = match self.mode {
            ViewMode::List => ViewMode::Chart,
            ViewMode::Chart => ViewMode::List,
        };
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{amount::Amount, filter::CategoryPredicate};
    use chrono::NaiveDate;

    #[test]
    fn toggle_starts_in_list_mode_and_flips() {
        let mut toggle = ToggleView::default();
        assert!(toggle.is_list_mode());
        assert_eq!(toggle.switch(), ViewMode::Chart);
        assert_eq!(toggle.get(), ViewMode::Chart);
        toggle.switch();
        assert!(toggle.is_list_mode());
    }

    #[test]
    fn projection_keeps_store_order() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let store: Vec<_> = ["FOOD", "RENT", "FOOD"]
            .iter()
            .enumerate()
            .map(|(idx, category)| {
                Transaction::new(
                    format!("t{idx}"),
                    Amount::expense(1.0).unwrap(),
                    date,
                    "",
                    *category,
                )
            })
            .collect();
        let visible = project(&store, &CategoryPredicate::new(["FOOD"]));
        assert_eq!(visible, vec![0, 2]);

        let view = FilteredView::new(&store, &visible);
        let names: Vec<_> = view.iter().map(Transaction::name).collect();
        assert_eq!(names, vec!["t0", "t2"]);
        assert_eq!(view.get(1).map(Transaction::name), Some("t2"));
        assert!(view.get(2).is_none());
    }
}
