//! Assess Risk Use Case
//!
//! Loads a portfolio's holdings, runs the risk engine, persists the latest
//! snapshot and derives suggestions.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use super::access::owned_portfolio;
use crate::application::ports::HoldingsStore;
use crate::domain::risk_management::{
    PortfolioHoldings, RiskEngine, RiskMetrics, Suggestion, SuggestionGenerator,
};
use crate::domain::shared::{PortfolioId, UserId};
use crate::error::EngineError;
use crate::observability::{record_risk_assessment, record_suggestions};

/// Use case for portfolio risk assessment and suggestions.
pub struct AssessRiskUseCase<S>
where
    S: HoldingsStore,
{
    store: Arc<S>,
    engine: RiskEngine,
    suggestions: SuggestionGenerator,
}

impl<S> AssessRiskUseCase<S>
where
    S: HoldingsStore,
{
    /// Create a new `AssessRiskUseCase`.
    pub const fn new(store: Arc<S>, engine: RiskEngine, suggestions: SuggestionGenerator) -> Self {
        Self {
            store,
            engine,
            suggestions,
        }
    }

    /// Assess a portfolio and save the result as its latest snapshot.
    ///
    /// A failed snapshot write is logged and does not fail the assessment;
    /// the snapshot is an audit copy, holdings remain the source of truth.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Forbidden`, `Validation` for invalid stored holdings, or
    /// `DependencyFailure` if holdings cannot be loaded.
    pub async fn assess(
        &self,
        user_id: &UserId,
        portfolio_id: &PortfolioId,
    ) -> Result<RiskMetrics, EngineError> {
        let holdings = self.load(user_id, portfolio_id).await?;

        let started = Instant::now();
        let metrics = self.engine.assess(&holdings, Utc::now())?;
        record_risk_assessment(
            metrics.risk_level.as_str(),
            started.elapsed().as_secs_f64(),
        );

        tracing::info!(
            portfolio_id = %portfolio_id,
            risk_level = %metrics.risk_level,
            leverage_ratio = %metrics.metrics.leverage_ratio,
            max_concentration = %metrics.metrics.max_concentration,
            "Risk assessed"
        );

        if let Err(e) = self.store.save_risk_snapshot(metrics.clone()).await {
            tracing::warn!(
                portfolio_id = %portfolio_id,
                error = %e,
                "Failed to save risk snapshot"
            );
        }

        Ok(metrics)
    }

    /// Suggestions for a portfolio as of now. Nothing is persisted.
    ///
    /// # Errors
    ///
    /// Same as [`Self::assess`].
    pub async fn suggest(
        &self,
        user_id: &UserId,
        portfolio_id: &PortfolioId,
    ) -> Result<Vec<Suggestion>, EngineError> {
        let holdings = self.load(user_id, portfolio_id).await?;
        let now = Utc::now();
        let assessed = self.engine.assess(&holdings, now)?;

        let suggestions = self.suggestions.generate(
            &assessed.metrics,
            &holdings.stocks,
            &holdings.options,
            now,
        );
        record_suggestions(suggestions.len());
        tracing::debug!(
            portfolio_id = %portfolio_id,
            count = suggestions.len(),
            "Suggestions generated"
        );
        Ok(suggestions)
    }

    /// Most recently saved snapshot, if any.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Forbidden` or `DependencyFailure`.
    pub async fn latest_snapshot(
        &self,
        user_id: &UserId,
        portfolio_id: &PortfolioId,
    ) -> Result<Option<RiskMetrics>, EngineError> {
        owned_portfolio(&*self.store, user_id, portfolio_id).await?;
        self.store
            .latest_risk_snapshot(portfolio_id)
            .await
            .map_err(|e| EngineError::from_store("load risk snapshot", e))
    }

    async fn load(
        &self,
        user_id: &UserId,
        portfolio_id: &PortfolioId,
    ) -> Result<PortfolioHoldings, EngineError> {
        let portfolio = owned_portfolio(&*self.store, user_id, portfolio_id).await?;
        let stocks = self
            .store
            .get_stock_holdings(portfolio_id)
            .await
            .map_err(|e| EngineError::from_store("load stock holdings", e))?;
        let options = self
            .store
            .get_option_holdings(portfolio_id)
            .await
            .map_err(|e| EngineError::from_store("load option holdings", e))?;
        Ok(PortfolioHoldings::new(portfolio, stocks, options))
    }
}
