use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Rounds a monetary value to cent precision.
///
/// Applied after every incremental aggregate update so float drift never
/// accumulates across long mutation sequences.
pub fn round_money(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// A non-negative magnitude paired with an income/expense flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "RawAmount")]
pub struct Amount {
    magnitude: f64,
    is_income: bool,
}

/// Stored shape of an [`Amount`]; loaded values go through [`Amount::new`].
#[derive(Deserialize)]
struct RawAmount {
    magnitude: f64,
    is_income: bool,
}

impl TryFrom<RawAmount> for Amount {
    type Error = LedgerError;

    fn try_from(raw: RawAmount) -> Result<Self, Self::Error> {
        Amount::new(raw.magnitude, raw.is_income)
    }
}

impl Amount {
    pub fn new(magnitude: f64, is_income: bool) -> Result<Self, LedgerError> {
        if !magnitude.is_finite() || magnitude < 0.0 {
            return Err(LedgerError::InvalidAmount(magnitude));
        }
        let magnitude = round_money(magnitude);
        if !magnitude.is_finite() {
            return Err(LedgerError::InvalidAmount(magnitude));
        }
        Ok(Self {
            magnitude,
            is_income,
        })
    }

    pub fn income(magnitude: f64) -> Result<Self, LedgerError> {
        Self::new(magnitude, true)
    }

    pub fn expense(magnitude: f64) -> Result<Self, LedgerError> {
        Self::new(magnitude, false)
    }

    /// Builds an amount from a signed value; zero counts as income.
    pub fn from_signed(value: f64) -> Result<Self, LedgerError> {
        if !value.is_finite() {
            return Err(LedgerError::InvalidAmount(value));
        }
        Self::new(value.abs(), value >= 0.0)
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn is_income(&self) -> bool {
        self.is_income
    }

    pub fn signed(&self) -> f64 {
        if self.is_income {
            self.magnitude
        } else {
            -self.magnitude
        }
    }
}

impl PartialEq for Amount {
    fn eq(&self, other: &Self) -> bool {
        // Magnitudes are already rounded to cents on construction.
        self.is_income == other.is_income && self.magnitude == other.magnitude
    }
}

impl Eq for Amount {}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_income { '+' } else { '-' };
        write!(f, "{}{:.2}", sign, self.magnitude)
    }
}
