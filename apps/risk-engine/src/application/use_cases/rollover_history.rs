//! Rollover History Use Case

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::access::owned_portfolio;
use crate::application::ports::HoldingsStore;
use crate::domain::holdings::RolloverRecord;
use crate::domain::shared::{Money, PortfolioId, UserId};
use crate::error::EngineError;

/// Rollover ledger of one portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverHistory {
    /// Records, newest first.
    pub records: Vec<RolloverRecord>,
    /// Sum of realized P&L across all records.
    pub total_realized_pnl: Money,
}

/// Use case for listing a portfolio's rollovers.
pub struct RolloverHistoryUseCase<S>
where
    S: HoldingsStore,
{
    store: Arc<S>,
}

impl<S> RolloverHistoryUseCase<S>
where
    S: HoldingsStore,
{
    /// Create a new `RolloverHistoryUseCase`.
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// List rollovers newest first with their realized P&L total.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Forbidden` or `DependencyFailure`.
    pub async fn execute(
        &self,
        user_id: &UserId,
        portfolio_id: &PortfolioId,
    ) -> Result<RolloverHistory, EngineError> {
        owned_portfolio(&*self.store, user_id, portfolio_id).await?;

        let mut records = self
            .store
            .list_rollover_records(portfolio_id)
            .await
            .map_err(|e| EngineError::from_store("list rollover records", e))?;
        // Reversed first so records sharing a timestamp list latest-inserted first.
        records.reverse();
        records.sort_by(|a, b| b.rollover_date.cmp(&a.rollover_date));

        let total_realized_pnl = records.iter().map(|r| r.realized_pnl).sum();
        Ok(RolloverHistory {
            records,
            total_realized_pnl,
        })
    }
}
