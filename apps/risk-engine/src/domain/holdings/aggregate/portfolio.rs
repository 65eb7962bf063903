//! Portfolio entity: the cash and margin state that holdings are measured against.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{DomainError, Money, PortfolioId, UserId};

/// A user's brokerage account as seen by the risk engine.
///
/// `margin_used <= total_equity` is expected but not enforced; a portfolio
/// that breaks it simply reports negative remaining liquidity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Portfolio identifier.
    pub id: PortfolioId,
    /// Owning user.
    pub user_id: UserId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Net liquidation value of the account.
    pub total_equity: Money,
    /// Cash balance (may be negative when borrowing).
    #[serde(default)]
    pub cash_balance: Money,
    /// Margin currently borrowed.
    #[serde(default)]
    pub margin_used: Money,
}

impl Portfolio {
    /// Create a portfolio with no cash and no margin recorded.
    #[must_use]
    pub fn new(id: PortfolioId, user_id: UserId, total_equity: Decimal) -> Self {
        Self {
            id,
            user_id,
            name: String::new(),
            total_equity: Money::new(total_equity),
            cash_balance: Money::ZERO,
            margin_used: Money::ZERO,
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the cash balance.
    #[must_use]
    pub const fn with_cash_balance(mut self, cash: Decimal) -> Self {
        self.cash_balance = Money::new(cash);
        self
    }

    /// Set the margin used.
    #[must_use]
    pub const fn with_margin_used(mut self, margin: Decimal) -> Self {
        self.margin_used = Money::new(margin);
        self
    }

    /// Whether `user` owns this portfolio.
    #[must_use]
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.user_id == user
    }

    /// Reject structurally invalid balances.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` for negative equity or negative margin.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.total_equity.ensure_non_negative("total_equity")?;
        self.margin_used.ensure_non_negative("margin_used")
    }
}
