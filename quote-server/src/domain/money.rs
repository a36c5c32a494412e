//! Monetary amounts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Currencies appearing in rate tables.
///
/// Sea freight and drop-off fees are tabulated in USD, inland rail in RUB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Rub,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Usd => f.write_str("USD"),
            Currency::Rub => f.write_str("RUB"),
        }
    }
}

/// An amount in a single currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub amount: f64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: f64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    pub fn usd(amount: f64) -> Self {
        Self::new(amount, Currency::Usd)
    }

    pub fn rub(amount: f64) -> Self {
        Self::new(amount, Currency::Rub)
    }

    /// Add a flat margin expressed in this amount's currency.
    pub fn with_margin(self, margin: f64) -> Self {
        Self::new(self.amount + margin, self.currency)
    }

    /// Sum two amounts of the same currency.
    ///
    /// Returns `None` if the currencies differ.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        (self.currency == other.currency).then(|| Money::new(self.amount + other.amount, self.currency))
    }

    /// Convert to USD using a fixed RUB-per-USD rate.
    pub fn to_usd(self, rub_per_usd: f64) -> f64 {
        match self.currency {
            Currency::Usd => self.amount,
            Currency::Rub => self.amount / rub_per_usd,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency)
    }
}

/// A tabulated fee: either a number or "quote on request".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeeAmount {
    Fixed(Money),
    OnRequest,
}

impl FeeAmount {
    pub fn fixed(&self) -> Option<Money> {
        match self {
            FeeAmount::Fixed(m) => Some(*m),
            FeeAmount::OnRequest => None,
        }
    }
}
