//! Holding ingestion DTOs
//!
//! Rows arriving from imports and older stores. Option rows carry a signed
//! contract count because some historical data encoded short positions as
//! negative contracts; the domain only accepts positive counts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::holdings::{Direction, OptionHolding, OptionType, StockHolding};
use crate::domain::shared::PortfolioId;
use crate::error::EngineError;

/// Stock row as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockHoldingRecord {
    /// Ticker.
    pub symbol: String,
    /// Display name. Defaults to the ticker.
    #[serde(default)]
    pub name: Option<String>,
    /// Signed share count.
    pub quantity: i64,
    /// Average cost per share.
    pub cost_price: Decimal,
    /// Market price.
    #[serde(default)]
    pub current_price: Option<Decimal>,
    /// Beta.
    #[serde(default)]
    pub beta: Option<Decimal>,
}

impl StockHoldingRecord {
    /// Convert into a validated stock lot of `portfolio_id`.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an empty symbol or negative prices.
    pub fn into_holding(self, portfolio_id: PortfolioId) -> Result<StockHolding, EngineError> {
        let mut holding = StockHolding::new(portfolio_id, self.symbol, self.quantity, self.cost_price);
        if let Some(name) = self.name {
            holding.name = name;
        }
        holding.current_price = self.current_price;
        holding.beta = self.beta;
        holding.validate()?;
        Ok(holding)
    }
}

/// Option row as received, with a possibly signed contract count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionHoldingRecord {
    /// Option symbol.
    pub option_symbol: String,
    /// Underlying ticker.
    pub underlying_symbol: String,
    /// Call or put.
    pub option_type: OptionType,
    /// Long or short. Authoritative for sign.
    pub direction: Direction,
    /// Contract count. Negative only in legacy rows.
    pub contracts: i64,
    /// Strike price.
    pub strike_price: Decimal,
    /// Expiration date.
    pub expiration_date: NaiveDate,
    /// Premium per share.
    pub cost_price: Decimal,
    /// Market premium.
    #[serde(default)]
    pub current_price: Option<Decimal>,
}

impl OptionHoldingRecord {
    /// Whether this row uses the legacy negative-contracts encoding.
    #[must_use]
    pub const fn has_signed_contracts(&self) -> bool {
        self.contracts < 0
    }

    /// Repair a legacy row: absolute contract count, direction unchanged.
    ///
    /// `i64::MIN` saturates and is then rejected as out of range.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.contracts = self.contracts.saturating_abs();
        self
    }

    /// Convert into a validated option lot of `portfolio_id`.
    ///
    /// Signed counts are never reinterpreted here; call [`Self::normalized`]
    /// first if the caller has opted into repairing them.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for non-positive contracts, empty symbols or
    /// negative prices.
    pub fn into_holding(self, portfolio_id: PortfolioId) -> Result<OptionHolding, EngineError> {
        if self.contracts <= 0 {
            return Err(EngineError::validation(
                "contracts",
                format!(
                    "{} for {}: must be positive, direction carries the sign",
                    self.contracts, self.option_symbol
                ),
            ));
        }
        let contracts = u32::try_from(self.contracts)
            .map_err(|_| EngineError::validation("contracts", "exceeds supported range"))?;

        let mut holding = OptionHolding::new(
            portfolio_id,
            self.option_symbol,
            self.underlying_symbol,
            self.option_type,
            self.direction,
            contracts,
            self.strike_price,
            self.expiration_date,
            self.cost_price,
        );
        holding.current_price = self.current_price;
        holding.validate()?;
        Ok(holding)
    }
}

/// Bulk import of holdings into one portfolio.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportHoldingsRequest {
    /// Stock rows.
    #[serde(default)]
    pub stocks: Vec<StockHoldingRecord>,
    /// Option rows.
    #[serde(default)]
    pub options: Vec<OptionHoldingRecord>,
    /// Delete existing holdings before importing.
    #[serde(default)]
    pub clear_existing: bool,
    /// Repair legacy negative contract counts instead of rejecting them.
    #[serde(default)]
    pub normalize_legacy_contracts: bool,
}

impl ImportHoldingsRequest {
    /// Parse a JSON import payload.
    ///
    /// # Errors
    ///
    /// Returns `Validation` naming the payload if it is not valid JSON for
    /// this shape.
    pub fn from_json(payload: &str) -> Result<Self, EngineError> {
        serde_json::from_str(payload).map_err(|e| EngineError::validation("payload", e.to_string()))
    }
}

/// Outcome of a bulk import. Rows that fail are reported, not fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    /// Stock rows inserted.
    pub stocks_added: usize,
    /// Option rows inserted.
    pub options_added: usize,
    /// Option symbols whose contract counts were normalized.
    pub normalized_contracts: Vec<String>,
    /// One message per rejected row.
    pub errors: Vec<String>,
}
