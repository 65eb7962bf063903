//! Parameters of a rollover request.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::holdings::OptionHolding;
use crate::domain::shared::DomainError;

/// Close and open legs of one rollover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverTerms {
    /// Premium per share paid or received to close the old lot.
    pub close_price: Decimal,
    /// Contracts closed.
    pub close_contracts: u32,
    /// Symbol of the replacement lot.
    pub new_option_symbol: String,
    /// Strike of the replacement lot.
    pub new_strike_price: Decimal,
    /// Expiration of the replacement lot.
    pub new_expiration_date: NaiveDate,
    /// Premium per share of the replacement lot.
    pub open_price: Decimal,
    /// Contracts opened.
    pub open_contracts: u32,
    /// Commissions for the whole rollover.
    #[serde(default)]
    pub fees: Option<Decimal>,
    /// Free-form note.
    #[serde(default)]
    pub notes: Option<String>,
    /// Effective time. Defaults to the time of execution.
    #[serde(default)]
    pub rollover_date: Option<DateTime<Utc>>,
}

impl RolloverTerms {
    /// Check the terms on their own and against the lot being closed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` for zero contracts, negative prices or fees, an
    /// empty symbol, or closing more contracts than `old` holds.
    pub fn validate(&self, old: &OptionHolding) -> Result<(), DomainError> {
        if self.close_contracts == 0 {
            return Err(DomainError::invalid("close_contracts", "must be positive"));
        }
        if self.open_contracts == 0 {
            return Err(DomainError::invalid("open_contracts", "must be positive"));
        }
        if self.close_contracts > old.contracts {
            return Err(DomainError::invalid(
                "close_contracts",
                format!(
                    "cannot close {} contracts of a {} contract position",
                    self.close_contracts, old.contracts
                ),
            ));
        }
        if self.close_price < Decimal::ZERO {
            return Err(DomainError::invalid("close_price", "cannot be negative"));
        }
        if self.open_price < Decimal::ZERO {
            return Err(DomainError::invalid("open_price", "cannot be negative"));
        }
        if self.new_strike_price < Decimal::ZERO {
            return Err(DomainError::invalid("new_strike_price", "cannot be negative"));
        }
        if self.fees.is_some_and(|f| f < Decimal::ZERO) {
            return Err(DomainError::invalid("fees", "cannot be negative"));
        }
        if self.new_option_symbol.trim().is_empty() {
            return Err(DomainError::invalid("new_option_symbol", "cannot be empty"));
        }
        Ok(())
    }
}
