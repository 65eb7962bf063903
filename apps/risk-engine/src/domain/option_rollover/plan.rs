//! What a rollover writes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::RolloverTerms;
use crate::domain::holdings::{CONTRACT_MULTIPLIER, Direction, OptionHolding, RolloverRecord};
use crate::domain::shared::{DomainError, Money};

/// P&L locked in by closing `contracts` of `holding` at `close_price`, net of fees.
///
/// Short lots profit when the premium falls, long lots when it rises.
#[must_use]
pub fn realized_pnl(
    holding: &OptionHolding,
    close_price: Decimal,
    contracts: u32,
    fees: Option<Decimal>,
) -> Money {
    let per_share = match holding.direction {
        Direction::Sell => holding.cost_price - close_price,
        Direction::Buy => close_price - holding.cost_price,
    };
    let gross = per_share * Decimal::from(contracts) * CONTRACT_MULTIPLIER;
    Money::new(gross - fees.unwrap_or(Decimal::ZERO))
}

/// The three writes of a rollover, computed up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolloverPlan {
    /// Lot to insert.
    pub replacement: OptionHolding,
    /// Old lot as it should look after the rollover.
    pub rolled: OptionHolding,
    /// Ledger entry linking both.
    pub record: RolloverRecord,
    /// P&L on the closed contracts.
    pub realized_pnl: Money,
    /// When the rollover takes effect.
    pub rollover_date: DateTime<Utc>,
    /// Fewer contracts closed than held. The whole lot is still marked rolled.
    pub partial_close: bool,
}

impl RolloverPlan {
    /// Plan rolling `old` on `terms`. `now` is used when the terms carry no date.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if the terms are invalid and
    /// `InvalidStateTransition` if `old` is not active.
    pub fn build(
        old: &OptionHolding,
        terms: &RolloverTerms,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        terms.validate(old)?;
        let rollover_date = terms.rollover_date.unwrap_or(now);

        let mut rolled = old.clone();
        rolled.mark_rolled(rollover_date)?;

        let replacement = old.replacement(
            terms.new_option_symbol.clone(),
            terms.new_strike_price,
            terms.new_expiration_date,
            terms.open_contracts,
            terms.open_price,
        );
        let pnl = realized_pnl(old, terms.close_price, terms.close_contracts, terms.fees);
        let record = RolloverRecord::link(
            old,
            &replacement,
            terms.close_price,
            terms.close_contracts,
            pnl,
            rollover_date,
        )
        .with_fees(terms.fees)
        .with_notes(terms.notes.clone());

        Ok(Self {
            replacement,
            rolled,
            record,
            realized_pnl: pnl,
            rollover_date,
            partial_close: terms.close_contracts < old.contracts,
        })
    }
}
