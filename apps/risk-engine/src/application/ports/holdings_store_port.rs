//! Holdings Store Port (Driven Port)
//!
//! Interface for the external store that owns portfolios, holdings, rollover
//! records and risk snapshots. No cross-row transaction is assumed; callers
//! that need multi-step consistency must compensate themselves.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::holdings::{OptionHolding, OptionStatus, Portfolio, RolloverRecord, StockHolding};
use crate::domain::risk_management::RiskMetrics;
use crate::domain::shared::{HoldingId, PortfolioId};

/// Store failures. Not-found is distinguishable from everything else.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The requested row does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind.
        entity: String,
        /// Identifier looked up.
        id: String,
    },

    /// Any other store failure.
    #[error("store error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Shorthand for a [`StoreError::NotFound`].
    #[must_use]
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }
}

/// Partial update of an option holding. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionHoldingPatch {
    /// New status.
    pub status: Option<OptionStatus>,
    /// New close timestamp. `Some(None)` clears it.
    pub closed_at: Option<Option<DateTime<Utc>>>,
    /// New contract count.
    pub contracts: Option<u32>,
    /// New market premium.
    pub current_price: Option<Decimal>,
}

impl OptionHoldingPatch {
    /// Carry the lifecycle fields of `holding`, its status and close timestamp.
    ///
    /// Used to persist a transition already made on the domain object.
    #[must_use]
    pub fn status_of(holding: &OptionHolding) -> Self {
        Self {
            status: Some(holding.status),
            closed_at: Some(holding.closed_at),
            ..Self::default()
        }
    }

    /// Apply this patch to `holding` in place.
    pub fn apply(&self, holding: &mut OptionHolding) {
        if let Some(status) = self.status {
            holding.status = status;
        }
        if let Some(closed_at) = self.closed_at {
            holding.closed_at = closed_at;
        }
        if let Some(contracts) = self.contracts {
            holding.contracts = contracts;
        }
        if let Some(price) = self.current_price {
            holding.current_price = Some(price);
        }
    }
}

/// Port for the holdings store.
#[async_trait]
pub trait HoldingsStore: Send + Sync {
    /// Load a portfolio.
    async fn get_portfolio(&self, id: &PortfolioId) -> Result<Portfolio, StoreError>;

    /// All stock lots of a portfolio.
    async fn get_stock_holdings(
        &self,
        portfolio_id: &PortfolioId,
    ) -> Result<Vec<StockHolding>, StoreError>;

    /// Insert a stock lot.
    async fn create_stock_holding(
        &self,
        holding: StockHolding,
    ) -> Result<StockHolding, StoreError>;

    /// Delete a stock lot.
    async fn delete_stock_holding(&self, id: &HoldingId) -> Result<(), StoreError>;

    /// All option lots of a portfolio, any status.
    async fn get_option_holdings(
        &self,
        portfolio_id: &PortfolioId,
    ) -> Result<Vec<OptionHolding>, StoreError>;

    /// Load one option lot.
    async fn get_option_holding(&self, id: &HoldingId) -> Result<OptionHolding, StoreError>;

    /// Insert an option lot.
    async fn create_option_holding(
        &self,
        holding: OptionHolding,
    ) -> Result<OptionHolding, StoreError>;

    /// Apply a partial update to an option lot and return the result.
    async fn update_option_holding(
        &self,
        id: &HoldingId,
        patch: OptionHoldingPatch,
    ) -> Result<OptionHolding, StoreError>;

    /// Delete an option lot.
    async fn delete_option_holding(&self, id: &HoldingId) -> Result<(), StoreError>;

    /// Append a rollover record.
    async fn create_rollover_record(
        &self,
        record: RolloverRecord,
    ) -> Result<RolloverRecord, StoreError>;

    /// All rollover records of a portfolio, in insertion order.
    async fn list_rollover_records(
        &self,
        portfolio_id: &PortfolioId,
    ) -> Result<Vec<RolloverRecord>, StoreError>;

    /// Replace the latest risk snapshot of a portfolio.
    async fn save_risk_snapshot(&self, snapshot: RiskMetrics) -> Result<(), StoreError>;

    /// Latest risk snapshot of a portfolio, if one was saved.
    async fn latest_risk_snapshot(
        &self,
        portfolio_id: &PortfolioId,
    ) -> Result<Option<RiskMetrics>, StoreError>;
}
