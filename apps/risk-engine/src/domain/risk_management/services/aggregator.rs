//! Portfolio roll-up of lot-level values.

use rust_decimal::Decimal;

use super::MaxLossEstimator;
use crate::domain::holdings::{OptionHolding, Portfolio, StockHolding};
use crate::domain::risk_management::value_objects::AggregatedMetrics;
use crate::domain::shared::{DomainError, Money, percent_of};

/// Rolls stock and option lots up into portfolio metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortfolioAggregator {
    estimator: MaxLossEstimator,
}

impl PortfolioAggregator {
    /// Create an aggregator using `estimator` for option max loss.
    #[must_use]
    pub const fn new(estimator: MaxLossEstimator) -> Self {
        Self { estimator }
    }

    /// Aggregate one portfolio.
    ///
    /// Only `ACTIVE` option lots take part. Degenerate inputs such as zero
    /// equity or an empty book produce boundary values, never errors.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if the portfolio or any participating lot is
    /// structurally invalid (negative prices, zero contracts, empty symbol),
    /// or if the option max loss overflows.
    pub fn aggregate(
        &self,
        portfolio: &Portfolio,
        stocks: &[StockHolding],
        options: &[OptionHolding],
    ) -> Result<AggregatedMetrics, DomainError> {
        portfolio.validate()?;
        for stock in stocks {
            stock.validate()?;
        }
        let active: Vec<&OptionHolding> = options.iter().filter(|o| o.status.is_active()).collect();
        for option in &active {
            option.validate()?;
        }

        let stock_value: Money = stocks.iter().map(StockHolding::market_value).sum();
        let stock_unrealized_pnl: Money = stocks.iter().map(|s| s.pnl().absolute).sum();

        let option_max_loss = active.iter().try_fold(Money::ZERO, |total, o| {
            let loss = self
                .estimator
                .estimate(o, Self::underlying_price(stocks, &o.underlying_symbol))?;
            total
                .amount()
                .checked_add(loss.amount())
                .map(Money::new)
                .ok_or_else(|| DomainError::invalid("option_max_loss", "exceeds representable range"))
        })?;
        let option_market_value: Money = active.iter().map(|o| o.market_value()).sum();
        let option_unrealized_pnl: Money = active.iter().map(|o| o.unrealized_pnl()).sum();

        let (max_concentration, max_concentration_symbol) =
            Self::max_concentration(stocks, stock_value);

        let equity = portfolio.total_equity.amount();
        let margin = portfolio.margin_used.amount();

        Ok(AggregatedMetrics {
            total_equity: portfolio.total_equity,
            stock_value,
            option_max_loss,
            option_market_value,
            stock_unrealized_pnl,
            option_unrealized_pnl,
            portfolio_beta: Self::portfolio_beta(stocks, stock_value),
            max_concentration,
            max_concentration_symbol,
            margin_usage_ratio: percent_of(margin, equity).unwrap_or(Decimal::ZERO),
            remaining_liquidity: percent_of(equity - margin, equity),
            leverage_ratio: (stock_value + option_max_loss)
                .amount()
                .checked_div(equity)
                .unwrap_or(Decimal::ZERO),
            active_option_count: active.len(),
        })
    }

    /// Current price of the first stock lot on `underlying`, if any.
    fn underlying_price(stocks: &[StockHolding], underlying: &str) -> Option<Decimal> {
        stocks
            .iter()
            .find(|s| s.symbol == underlying)
            .map(StockHolding::effective_price)
    }

    fn portfolio_beta(stocks: &[StockHolding], stock_value: Money) -> Decimal {
        let weighted: Decimal = stocks
            .iter()
            .map(|s| s.market_value().amount() * s.effective_beta())
            .sum();
        weighted
            .checked_div(stock_value.amount())
            .unwrap_or(Decimal::ONE)
    }

    fn max_concentration(stocks: &[StockHolding], stock_value: Money) -> (Decimal, Option<String>) {
        let mut best = (Decimal::ZERO, None);
        for stock in stocks {
            let Some(share) = percent_of(stock.market_value().amount(), stock_value.amount())
            else {
                continue;
            };
            if best.1.is_none() || share > best.0 {
                best = (share, Some(stock.symbol.clone()));
            }
        }
        (best.0.max(Decimal::ZERO), best.1)
    }
}
