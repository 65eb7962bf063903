//! Rollover DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::option_rollover::RolloverTerms;
use crate::domain::shared::{HoldingId, PortfolioId, UserId};
use crate::error::EngineError;

/// Request to roll one option lot into a new one.
///
/// Contract counts arrive signed so that non-positive input can be rejected
/// explicitly instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolloverCommand {
    /// Caller.
    pub user_id: UserId,
    /// Portfolio the caller is acting on.
    pub portfolio_id: PortfolioId,
    /// Lot to close.
    pub old_holding_id: HoldingId,
    /// Premium per share to close.
    pub close_price: Decimal,
    /// Contracts to close.
    pub close_contracts: i64,
    /// Symbol of the replacement.
    pub new_option_symbol: String,
    /// Strike of the replacement.
    pub new_strike_price: Decimal,
    /// Expiration of the replacement.
    pub new_expiration_date: NaiveDate,
    /// Premium per share to open.
    pub open_price: Decimal,
    /// Contracts to open.
    pub open_contracts: i64,
    /// Commissions.
    #[serde(default)]
    pub fees: Option<Decimal>,
    /// Free-form note.
    #[serde(default)]
    pub notes: Option<String>,
    /// Effective time. Defaults to now.
    #[serde(default)]
    pub rollover_date: Option<DateTime<Utc>>,
}

impl RolloverCommand {
    /// Domain terms of this command.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if either contract count is not a positive integer.
    pub fn to_terms(&self) -> Result<RolloverTerms, EngineError> {
        Ok(RolloverTerms {
            close_price: self.close_price,
            close_contracts: positive_contracts("close_contracts", self.close_contracts)?,
            new_option_symbol: self.new_option_symbol.clone(),
            new_strike_price: self.new_strike_price,
            new_expiration_date: self.new_expiration_date,
            open_price: self.open_price,
            open_contracts: positive_contracts("open_contracts", self.open_contracts)?,
            fees: self.fees,
            notes: self.notes.clone(),
            rollover_date: self.rollover_date,
        })
    }
}

fn positive_contracts(field: &str, value: i64) -> Result<u32, EngineError> {
    if value <= 0 {
        return Err(EngineError::validation(field, format!("must be positive, got {value}")));
    }
    u32::try_from(value).map_err(|_| EngineError::validation(field, "exceeds supported range"))
}
