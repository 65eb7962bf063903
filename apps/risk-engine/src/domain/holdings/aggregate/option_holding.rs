//! Option lot entity: valuation, expiry arithmetic and status transitions.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::holdings::value_objects::{
    CONTRACT_MULTIPLIER, Direction, HoldingPnl, OptionStatus, OptionType,
};
use crate::domain::shared::{DomainError, HoldingId, Money, PortfolioId};

const SECONDS_PER_DAY: i64 = 86_400;

/// An option position inside one portfolio.
///
/// `contracts` is always positive; `direction` carries the sign. Prices are
/// per-share premiums, so dollar amounts multiply by [`CONTRACT_MULTIPLIER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionHolding {
    /// Holding identifier.
    pub id: HoldingId,
    /// Portfolio this lot belongs to.
    pub portfolio_id: PortfolioId,
    /// OCC-style option symbol.
    pub option_symbol: String,
    /// Underlying ticker.
    pub underlying_symbol: String,
    /// Call or put.
    pub option_type: OptionType,
    /// Long or short.
    pub direction: Direction,
    /// Number of contracts (positive).
    pub contracts: u32,
    /// Strike price.
    pub strike_price: Decimal,
    /// Expiration date.
    pub expiration_date: NaiveDate,
    /// Premium paid (BUY) or received (SELL) per share.
    pub cost_price: Decimal,
    /// Last known premium. Falls back to `cost_price` when absent.
    #[serde(default)]
    pub current_price: Option<Decimal>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: OptionStatus,
    /// When the lot left `ACTIVE`.
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
}

impl OptionHolding {
    /// Create an active option lot.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        portfolio_id: PortfolioId,
        option_symbol: impl Into<String>,
        underlying_symbol: impl Into<String>,
        option_type: OptionType,
        direction: Direction,
        contracts: u32,
        strike_price: Decimal,
        expiration_date: NaiveDate,
        cost_price: Decimal,
    ) -> Self {
        Self {
            id: HoldingId::generate(),
            portfolio_id,
            option_symbol: option_symbol.into(),
            underlying_symbol: underlying_symbol.into(),
            option_type,
            direction,
            contracts,
            strike_price,
            expiration_date,
            cost_price,
            current_price: None,
            status: OptionStatus::Active,
            closed_at: None,
        }
    }

    /// Set the market premium.
    #[must_use]
    pub const fn with_current_price(mut self, price: Decimal) -> Self {
        self.current_price = Some(price);
        self
    }

    /// Build the lot that replaces this one in a rollover.
    ///
    /// Underlying, type and direction carry over; the premium paid or
    /// received becomes both the cost and the current price.
    #[must_use]
    pub fn replacement(
        &self,
        option_symbol: impl Into<String>,
        strike_price: Decimal,
        expiration_date: NaiveDate,
        contracts: u32,
        open_price: Decimal,
    ) -> Self {
        Self::new(
            self.portfolio_id.clone(),
            option_symbol,
            self.underlying_symbol.clone(),
            self.option_type,
            self.direction,
            contracts,
            strike_price,
            expiration_date,
            open_price,
        )
        .with_current_price(open_price)
    }

    /// Premium used for valuation.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        self.current_price.unwrap_or(self.cost_price)
    }

    /// Contracts scaled to underlying shares.
    #[must_use]
    pub fn share_equivalent(&self) -> Decimal {
        Decimal::from(self.contracts) * CONTRACT_MULTIPLIER
    }

    /// Mark-to-market value: an asset when long, a liability when short.
    #[must_use]
    pub fn market_value(&self) -> Money {
        Money::new(self.effective_price() * self.share_equivalent() * self.direction.sign())
    }

    /// Premium paid or received in dollars.
    #[must_use]
    pub fn cost_basis(&self) -> Money {
        Money::new(self.cost_price * self.share_equivalent())
    }

    /// Unrealized P&L: long lots gain when the premium rises, short lots when it falls.
    #[must_use]
    pub fn pnl(&self) -> HoldingPnl {
        let absolute = (self.effective_price() - self.cost_price)
            * self.share_equivalent()
            * self.direction.sign();
        HoldingPnl::from_cost_basis(absolute, self.cost_basis().amount())
    }

    /// Dollar part of [`Self::pnl`].
    #[must_use]
    pub fn unrealized_pnl(&self) -> Money {
        self.pnl().absolute
    }

    /// Whole days until expiry, rounded up. Expiry is midnight UTC of the expiration date.
    #[must_use]
    pub fn days_to_expiration(&self, now: DateTime<Utc>) -> i64 {
        let expiry = self.expiration_date.and_time(chrono::NaiveTime::MIN).and_utc();
        let seconds = (expiry - now).num_seconds();
        let days = seconds.div_euclid(SECONDS_PER_DAY);
        if seconds.rem_euclid(SECONDS_PER_DAY) > 0 {
            days + 1
        } else {
            days
        }
    }

    /// Move `ACTIVE -> ROLLED`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` unless the lot is active.
    pub fn mark_rolled(&mut self, at: DateTime<Utc>) -> Result<(), DomainError> {
        self.transition(OptionStatus::Rolled, Some(at), "rollover")
    }

    /// Move `ACTIVE -> CLOSED`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` unless the lot is active.
    pub fn close(&mut self, at: DateTime<Utc>) -> Result<(), DomainError> {
        self.transition(OptionStatus::Closed, Some(at), "close")
    }

    /// Undo a rollover: `ROLLED -> ACTIVE` with `closed_at` cleared.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` unless the lot is rolled.
    pub fn revert_roll(&mut self) -> Result<(), DomainError> {
        self.transition(OptionStatus::Active, None, "rollover compensation")
    }

    fn transition(
        &mut self,
        next: OptionStatus,
        closed_at: Option<DateTime<Utc>>,
        reason: &str,
    ) -> Result<(), DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::InvalidStateTransition {
                entity: "OptionHolding".to_string(),
                from: self.status.to_string(),
                to: next.to_string(),
                reason: format!("{reason} not allowed from {}", self.status),
            });
        }
        self.status = next;
        self.closed_at = closed_at;
        Ok(())
    }

    /// Reject structurally invalid lots.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` for zero contracts, empty symbols or negative prices.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.contracts == 0 {
            return Err(DomainError::invalid("contracts", "must be positive"));
        }
        if self.option_symbol.trim().is_empty() {
            return Err(DomainError::invalid("option_symbol", "cannot be empty"));
        }
        if self.underlying_symbol.trim().is_empty() {
            return Err(DomainError::invalid("underlying_symbol", "cannot be empty"));
        }
        if self.strike_price < Decimal::ZERO {
            return Err(DomainError::invalid("strike_price", "cannot be negative"));
        }
        if self.cost_price < Decimal::ZERO {
            return Err(DomainError::invalid("cost_price", "cannot be negative"));
        }
        if self.current_price.is_some_and(|p| p < Decimal::ZERO) {
            return Err(DomainError::invalid("current_price", "cannot be negative"));
        }
        Ok(())
    }
}
