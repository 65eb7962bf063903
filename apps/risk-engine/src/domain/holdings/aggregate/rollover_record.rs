//! Immutable ledger entry for one completed rollover.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OptionHolding;
use crate::domain::shared::{HoldingId, Money, PortfolioId, RolloverId};

/// Links the closed leg of a rollover to the leg that replaced it.
///
/// Records are append-only: they are created as the last step of a rollover
/// and never updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverRecord {
    /// Record identifier.
    pub id: RolloverId,
    /// Portfolio both legs belong to.
    pub portfolio_id: PortfolioId,
    /// Holding that was closed.
    pub old_holding_id: HoldingId,
    /// Symbol of the closed leg.
    pub old_option_symbol: String,
    /// Strike of the closed leg.
    pub old_strike_price: Decimal,
    /// Expiration of the closed leg.
    pub old_expiration_date: NaiveDate,
    /// Premium per share at close.
    pub close_price: Decimal,
    /// Contracts closed.
    pub close_contracts: u32,
    /// Holding that was opened.
    pub new_holding_id: HoldingId,
    /// Symbol of the new leg.
    pub new_option_symbol: String,
    /// Strike of the new leg.
    pub new_strike_price: Decimal,
    /// Expiration of the new leg.
    pub new_expiration_date: NaiveDate,
    /// Premium per share at open.
    pub open_price: Decimal,
    /// Contracts opened.
    pub open_contracts: u32,
    /// P&L locked in on the closed contracts, net of fees.
    pub realized_pnl: Money,
    /// Commissions charged for the whole rollover.
    #[serde(default)]
    pub fees: Option<Decimal>,
    /// Free-form note.
    #[serde(default)]
    pub notes: Option<String>,
    /// When the rollover took effect.
    pub rollover_date: DateTime<Utc>,
}

impl RolloverRecord {
    /// Build a record from the two legs of a rollover.
    ///
    /// `old` is the holding as it was before the rollover and `new` is the
    /// replacement; price and contract fields are taken from them.
    #[must_use]
    pub fn link(
        old: &OptionHolding,
        new: &OptionHolding,
        close_price: Decimal,
        close_contracts: u32,
        realized_pnl: Money,
        rollover_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RolloverId::generate(),
            portfolio_id: old.portfolio_id.clone(),
            old_holding_id: old.id.clone(),
            old_option_symbol: old.option_symbol.clone(),
            old_strike_price: old.strike_price,
            old_expiration_date: old.expiration_date,
            close_price,
            close_contracts,
            new_holding_id: new.id.clone(),
            new_option_symbol: new.option_symbol.clone(),
            new_strike_price: new.strike_price,
            new_expiration_date: new.expiration_date,
            open_price: new.cost_price,
            open_contracts: new.contracts,
            realized_pnl,
            fees: None,
            notes: None,
            rollover_date,
        }
    }

    /// Point the new leg at `new`, typically the lot as the store saved it.
    #[must_use]
    pub fn with_replacement(mut self, new: &OptionHolding) -> Self {
        self.new_holding_id = new.id.clone();
        self.new_option_symbol = new.option_symbol.clone();
        self.new_strike_price = new.strike_price;
        self.new_expiration_date = new.expiration_date;
        self.open_price = new.cost_price;
        self.open_contracts = new.contracts;
        self
    }

    /// Attach fees.
    #[must_use]
    pub const fn with_fees(mut self, fees: Option<Decimal>) -> Self {
        self.fees = fees;
        self
    }

    /// Attach a note.
    #[must_use]
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }
}
