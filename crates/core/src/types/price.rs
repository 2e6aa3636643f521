//! Sale prices.
//!
//! The vending system records prices as integer cents. `Price` keeps that
//! representation on the wire and only turns it into a `Decimal` for display.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A sale price in cents.
///
/// Serializes as the raw integer so API consumers see the same value the
/// `lineitems.price` column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Create a price from an amount in cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Get the amount in cents.
    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the amount in dollars.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Whether this price represents an actual sale.
    ///
    /// Zero and negative prices show up for comped items and refunds.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Format for display (e.g., "$1.25").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.amount())
    }
}

impl From<i32> for Price {
    fn from(cents: i32) -> Self {
        Self(i64::from(cents))
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}
