//! Import Holdings Use Case
//!
//! Bulk ingestion of stock and option rows into one portfolio. This is the
//! boundary where legacy signed contract counts are either repaired (when the
//! caller opts in) or rejected; the engine itself never sees a negative count.

use std::sync::Arc;

use super::access::owned_portfolio;
use crate::application::dto::{ImportHoldingsRequest, ImportReport};
use crate::application::ports::HoldingsStore;
use crate::domain::shared::{PortfolioId, UserId};
use crate::error::EngineError;
use crate::observability::record_contract_normalization;

/// Use case for importing holdings.
pub struct ImportHoldingsUseCase<S>
where
    S: HoldingsStore,
{
    store: Arc<S>,
}

impl<S> ImportHoldingsUseCase<S>
where
    S: HoldingsStore,
{
    /// Create a new `ImportHoldingsUseCase`.
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Import rows into `portfolio_id`.
    ///
    /// Invalid rows are skipped and listed in the report. Store failures
    /// abort the import.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Forbidden` or `DependencyFailure`.
    pub async fn execute(
        &self,
        user_id: &UserId,
        portfolio_id: &PortfolioId,
        request: ImportHoldingsRequest,
    ) -> Result<ImportReport, EngineError> {
        owned_portfolio(&*self.store, user_id, portfolio_id).await?;

        if request.clear_existing {
            self.clear(portfolio_id).await?;
        }

        let mut report = ImportReport::default();

        for row in request.stocks {
            let symbol = row.symbol.clone();
            match row.into_holding(portfolio_id.clone()) {
                Ok(holding) => {
                    self.store
                        .create_stock_holding(holding)
                        .await
                        .map_err(|e| EngineError::dependency("create stock holding", &e))?;
                    report.stocks_added += 1;
                }
                Err(e) => report.errors.push(format!("stock {symbol}: {e}")),
            }
        }

        for row in request.options {
            let symbol = row.option_symbol.clone();
            let row = if row.has_signed_contracts() && request.normalize_legacy_contracts {
                report.normalized_contracts.push(symbol.clone());
                row.normalized()
            } else {
                row
            };
            match row.into_holding(portfolio_id.clone()) {
                Ok(holding) => {
                    self.store
                        .create_option_holding(holding)
                        .await
                        .map_err(|e| EngineError::dependency("create option holding", &e))?;
                    report.options_added += 1;
                }
                Err(e) => report.errors.push(format!("option {symbol}: {e}")),
            }
        }

        if !report.normalized_contracts.is_empty() {
            tracing::warn!(
                portfolio_id = %portfolio_id,
                count = report.normalized_contracts.len(),
                "Normalized legacy negative contract counts"
            );
            record_contract_normalization(report.normalized_contracts.len());
        }
        tracing::info!(
            portfolio_id = %portfolio_id,
            stocks_added = report.stocks_added,
            options_added = report.options_added,
            rejected = report.errors.len(),
            "Holdings imported"
        );

        Ok(report)
    }

    async fn clear(&self, portfolio_id: &PortfolioId) -> Result<(), EngineError> {
        let stocks = self
            .store
            .get_stock_holdings(portfolio_id)
            .await
            .map_err(|e| EngineError::from_store("load stock holdings", e))?;
        for stock in stocks {
            self.store
                .delete_stock_holding(&stock.id)
                .await
                .map_err(|e| EngineError::dependency("delete stock holding", &e))?;
        }

        let options = self
            .store
            .get_option_holdings(portfolio_id)
            .await
            .map_err(|e| EngineError::from_store("load option holdings", e))?;
        for option in options {
            self.store
                .delete_option_holding(&option.id)
                .await
                .map_err(|e| EngineError::dependency("delete option holding", &e))?;
        }
        Ok(())
    }
}
