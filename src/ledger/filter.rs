//! Category and month predicates and the filter that combines them.

use serde::{Deserialize, Serialize};

use super::transaction::Transaction;
use crate::errors::LedgerError;

/// Keyword that matches every transaction on its axis.
pub const MATCH_ALL_KEYWORD: &str = "all";

/// A test applied to each transaction when refreshing the filtered view.
pub trait TransactionPredicate {
    fn matches(&self, transaction: &Transaction) -> bool;
}

fn is_match_all(keyword: &str) -> bool {
    keyword.eq_ignore_ascii_case(MATCH_ALL_KEYWORD)
}

/// Matches transactions whose category equals one of the keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CategoryPredicate {
    keywords: Vec<String>,
}

impl CategoryPredicate {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|keyword| keyword.as_ref().trim().to_string())
                .filter(|keyword| !keyword.is_empty())
                .collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl From<Vec<String>> for CategoryPredicate {
    fn from(keywords: Vec<String>) -> Self {
        Self::new(keywords)
    }
}

impl From<CategoryPredicate> for Vec<String> {
    fn from(predicate: CategoryPredicate) -> Self {
        predicate.keywords
    }
}

impl TransactionPredicate for CategoryPredicate {
    fn matches(&self, transaction: &Transaction) -> bool {
        let category = transaction.category().trim();
        self.keywords
            .iter()
            .any(|keyword| is_match_all(keyword) || keyword.eq_ignore_ascii_case(category))
    }
}

/// Matches transactions dated in one of the `YYYY-MM` keyword months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct DateMonthPredicate {
    keywords: Vec<String>,
}

impl DateMonthPredicate {
    /// Full dates such as `2020-02-15` are cut down to `2020-02`. No calendar
    /// validation happens here.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|keyword| truncate_to_month(keyword.as_ref()))
                .filter(|keyword| !keyword.is_empty())
                .collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

fn truncate_to_month(keyword: &str) -> String {
    let trimmed = keyword.trim();
    if is_match_all(trimmed) {
        return MATCH_ALL_KEYWORD.to_string();
    }
    trimmed.splitn(3, '-').take(2).collect::<Vec<_>>().join("-")
}

impl From<Vec<String>> for DateMonthPredicate {
    fn from(keywords: Vec<String>) -> Self {
        Self::new(keywords)
    }
}

impl From<DateMonthPredicate> for Vec<String> {
    fn from(predicate: DateMonthPredicate) -> Self {
        predicate.keywords
    }
}

impl TransactionPredicate for DateMonthPredicate {
    fn matches(&self, transaction: &Transaction) -> bool {
        let month = transaction.month_key();
        self.keywords
            .iter()
            .any(|keyword| is_match_all(keyword) || *keyword == month)
    }
}

/// The predicate actually applied to the store. `All` is the explicit
/// "nothing filtered" state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombinedPredicate {
    All,
    Category(CategoryPredicate),
    DateMonth(DateMonthPredicate),
    Both(CategoryPredicate, DateMonthPredicate),
}

impl CombinedPredicate {
    pub fn is_match_all(&self) -> bool {
        matches!(self, CombinedPredicate::All)
    }
}

impl TransactionPredicate for CombinedPredicate {
    fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            CombinedPredicate::All => true,
            CombinedPredicate::Category(category) => category.matches(transaction),
            CombinedPredicate::DateMonth(month) => month.matches(transaction),
            CombinedPredicate::Both(category, month) => {
                category.matches(transaction) && month.matches(transaction)
            }
        }
    }
}

/// Active category and month predicates. A missing axis matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<CategoryPredicate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date_month: Option<DateMonthPredicate>,
}

impl Filter {
    pub fn new(
        category: Option<CategoryPredicate>,
        date_month: Option<DateMonthPredicate>,
    ) -> Self {
        Self {
            category,
            date_month,
        }
    }

    pub fn category(&self) -> Option<&CategoryPredicate> {
        self.category.as_ref()
    }

    pub fn date_month(&self) -> Option<&DateMonthPredicate> {
        self.date_month.as_ref()
    }

    pub fn set_category(&mut self, predicate: Option<CategoryPredicate>) {
        self.category = predicate;
    }

    pub fn set_date_month(&mut self, predicate: Option<DateMonthPredicate>) {
        self.date_month = predicate;
    }

    /// Replaces each axis given as `Some`, leaving the other untouched.
    /// A request naming neither axis is rejected.
    pub fn update(
        &mut self,
        category: Option<CategoryPredicate>,
        date_month: Option<DateMonthPredicate>,
    ) -> Result<(), LedgerError> {
        if category.is_none() && date_month.is_none() {
            return Err(LedgerError::InvalidFilterState);
        }
        if category.is_some() {
            self.category = category;
        }
        if date_month.is_some() {
            self.date_month = date_month;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.category = None;
        self.date_month = None;
    }

    pub fn combined(&self) -> CombinedPredicate {
        match (&self.category, &self.date_month) {
            (Some(category), Some(month)) => {
                CombinedPredicate::Both(category.clone(), month.clone())
            }
            (Some(category), None) => CombinedPredicate::Category(category.clone()),
            (None, Some(month)) => CombinedPredicate::DateMonth(month.clone()),
            (None, None) => CombinedPredicate::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::amount::Amount;
    use chrono::NaiveDate;

    fn txn(category: &str, date: (i32, u32, u32)) -> Transaction {
        Transaction::new(
            "Item",
            Amount::expense(1.0).unwrap(),
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            "",
            category,
        )
    }

    #[test]
    fn category_match_is_trimmed_and_case_insensitive() {
        let predicate = CategoryPredicate::new([" food "]);
        assert!(predicate.matches(&txn("FOOD", (2020, 1, 1))));
        assert!(predicate.matches(&txn("Food ", (2020, 1, 1))));
        assert!(!predicate.matches(&txn("RENT", (2020, 1, 1))));
    }

    #[test]
    fn all_keyword_matches_every_category() {
        let predicate = CategoryPredicate::new(["ALL"]);
        assert!(predicate.matches(&txn("RENT", (2020, 1, 1))));
    }

    #[test]
    fn date_keywords_are_truncated_to_month() {
        let predicate = DateMonthPredicate::new(["2020-02-15"]);
        assert_eq!(predicate.keywords(), ["2020-02"]);
        assert!(predicate.matches(&txn("FOOD", (2020, 2, 1))));
        assert!(!predicate.matches(&txn("FOOD", (2020, 3, 1))));

        let any = DateMonthPredicate::new(["all"]);
        assert!(any.matches(&txn("FOOD", (1999, 12, 31))));
    }

    #[test]
    fn combined_predicate_follows_present_axes() {
        let mut filter = Filter::default();
        assert!(filter.combined().is_match_all());

        filter.set_category(Some(CategoryPredicate::new(["FOOD"])));
        assert!(matches!(filter.combined(), CombinedPredicate::Category(_)));

        filter.set_date_month(Some(DateMonthPredicate::new(["2020-02"])));
        let combined = filter.combined();
        assert!(combined.matches(&txn("FOOD", (2020, 2, 3))));
        assert!(!combined.matches(&txn("FOOD", (2020, 4, 3))));
        assert!(!combined.matches(&txn("RENT", (2020, 2, 3))));

        filter.set_category(None);
        assert!(matches!(filter.combined(), CombinedPredicate::DateMonth(_)));
    }

    #[test]
    fn update_without_axes_is_rejected_and_keeps_state() {
        let mut filter = Filter::new(Some(CategoryPredicate::new(["FOOD"])), None);
        let err = filter.update(None, None).unwrap_err();
        assert_eq!(err, LedgerError::InvalidFilterState);
        assert!(filter.category().is_some());

        filter
            .update(None, Some(DateMonthPredicate::new(["2021-07"])))
            .unwrap();
        assert!(filter.category().is_some());
        assert!(filter.date_month().is_some());
    }

    #[test]
    fn loaded_keywords_are_normalized() {
        let filter: Filter = serde_json::from_str(
            r#"{"category":["  food "],"date_month":["2020-02-15"]}"#,
        )
        .unwrap();
        assert_eq!(filter.category().unwrap().keywords(), ["food"]);
        assert_eq!(filter.date_month().unwrap().keywords(), ["2020-02"]);
        assert!(filter.combined().matches(&txn("FOOD", (2020, 2, 15))));

        let json = serde_json::to_string(&filter).unwrap();
        assert_eq!(json, r#"{"category":["food"],"date_month":["2020-02"]}"#);
    }
}
