use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::amount::Amount;

/// A single recorded income or expense. Never mutated once built; edits
/// produce a replacement via the `with_*` helpers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    name: String,
    amount: Amount,
    date: NaiveDate,
    #[serde(default)]
    remark: String,
    category: String,
}

impl Transaction {
    pub fn new(
        name: impl Into<String>,
        amount: Amount,
        date: NaiveDate,
        remark: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            date,
            remark: remark.into(),
            category: category.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn remark(&self) -> &str {
        &self.remark
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Duplicate-detection identity: same name and same amount.
    pub fn is_same_transaction(&self, other: &Transaction) -> bool {
        self.name == other.name && self.amount == other.amount
    }

    /// `YYYY-MM` key used by month filters.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    pub fn falls_in_month_of(&self, reference: NaiveDate) -> bool {
        self.date.year() == reference.year() && self.date.month() == reference.month()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_amount(mut self, amount: Amount) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = remark.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Amount: {} Date: {} Category: {}",
            self.name, self.amount, self.date, self.category
        )?;
        if !self.remark.is_empty() {
            write!(f, " Remarks: {}", self.remark)?;
        }
        Ok(())
    }
}
