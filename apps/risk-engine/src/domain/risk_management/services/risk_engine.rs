//! Aggregate-then-classify pipeline.

use chrono::{DateTime, Utc};
use rayon::prelude::*;

use super::{PortfolioAggregator, RiskClassifier};
use crate::domain::risk_management::value_objects::{PortfolioHoldings, RiskMetrics};
use crate::domain::shared::DomainError;

/// Runs aggregation and classification for whole portfolios.
///
/// Stateless; one engine can assess any number of portfolios concurrently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskEngine {
    aggregator: PortfolioAggregator,
    classifier: RiskClassifier,
}

impl RiskEngine {
    /// Create an engine from its two stages.
    #[must_use]
    pub const fn new(aggregator: PortfolioAggregator, classifier: RiskClassifier) -> Self {
        Self {
            aggregator,
            classifier,
        }
    }

    /// Assess one portfolio as of `at`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if any input is structurally invalid.
    pub fn assess(
        &self,
        holdings: &PortfolioHoldings,
        at: DateTime<Utc>,
    ) -> Result<RiskMetrics, DomainError> {
        let metrics = self.aggregator.aggregate(
            &holdings.portfolio,
            &holdings.stocks,
            &holdings.options,
        )?;
        let risk_level = self.classifier.classify(
            metrics.leverage_ratio,
            metrics.max_concentration,
            metrics.remaining_liquidity,
        );

        Ok(RiskMetrics {
            portfolio_id: holdings.portfolio.id.clone(),
            risk_level,
            metrics,
            calculated_at: at,
        })
    }

    /// Assess independent portfolios in parallel.
    ///
    /// Results keep the input order; one invalid portfolio does not affect
    /// the others.
    #[must_use]
    pub fn assess_batch(
        &self,
        portfolios: &[PortfolioHoldings],
        at: DateTime<Utc>,
    ) -> Vec<Result<RiskMetrics, DomainError>> {
        portfolios.par_iter().map(|p| self.assess(p, at)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::holdings::{Portfolio, StockHolding};
    use crate::domain::risk_management::value_objects::RiskLevel;
    use crate::domain::shared::{PortfolioId, UserId};
    use rust_decimal_macros::dec;

    fn book(id: &str, equity: rust_decimal::Decimal, stock_qty: i64) -> PortfolioHoldings {
        let pid = PortfolioId::new(id);
        let stocks = ["AAA", "BBB", "CCC", "DDD", "EEE", "FFF", "GGG", "HHH", "III", "JJJ"]
            .into_iter()
            .map(|symbol| StockHolding::new(pid.clone(), symbol, stock_qty, dec!(10)))
            .collect();
        PortfolioHoldings::new(
            Portfolio::new(pid, UserId::new("user-1"), equity),
            stocks,
            vec![],
        )
    }

    #[test]
    fn assess_classifies_leverage() {
        let engine = RiskEngine::default();
        let now = Utc::now();

        // 10 lots × 100 × 10 = 10_000 stock value, 10% each
        let spread = engine.assess(&book("a", dec!(20000), 100), now).unwrap();
        assert_eq!(spread.metrics.leverage_ratio, dec!(0.5));
        assert_eq!(spread.metrics.max_concentration, dec!(10));
        assert_eq!(spread.risk_level, RiskLevel::Yellow);

        let red = engine.assess(&book("b", dec!(5000), 100), now).unwrap();
        assert_eq!(red.risk_level, RiskLevel::Red);
        assert_eq!(red.metrics.leverage_ratio, dec!(2));
        assert_eq!(red.calculated_at, now);
    }

    #[test]
    fn batch_preserves_order_and_isolates_errors() {
        let engine = RiskEngine::default();
        let mut broken = book("broken", dec!(1000), 1);
        broken.stocks[0].cost_price = dec!(-1);

        let results = engine.assess_batch(
            &[book("first", dec!(20000), 100), broken, book("last", dec!(5000), 100)],
            Utc::now(),
        );

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().portfolio_id.as_str(), "first");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().portfolio_id.as_str(), "last");
    }
}
