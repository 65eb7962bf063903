//! Profit and loss for a single lot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{Money, percent_of};

/// Unrealized profit and loss of one holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HoldingPnl {
    /// Dollar gain (positive) or loss (negative).
    pub absolute: Money,
    /// Gain relative to cost basis, in percent. Zero when the cost basis is zero.
    pub percentage: Decimal,
}

impl HoldingPnl {
    /// Build from an absolute P&L and the cost basis it is measured against.
    #[must_use]
    pub fn from_cost_basis(absolute: Decimal, cost_basis: Decimal) -> Self {
        Self {
            absolute: Money::new(absolute),
            percentage: percent_of(absolute, cost_basis).unwrap_or(Decimal::ZERO),
        }
    }
}
