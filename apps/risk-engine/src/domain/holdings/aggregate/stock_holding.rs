//! Stock lot entity and its valuation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::holdings::value_objects::HoldingPnl;
use crate::domain::shared::{DomainError, HoldingId, Money, PortfolioId};

/// A stock position inside one portfolio.
///
/// `quantity` is signed: positive is long, negative is short.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockHolding {
    /// Holding identifier.
    pub id: HoldingId,
    /// Portfolio this lot belongs to.
    pub portfolio_id: PortfolioId,
    /// Ticker symbol.
    pub symbol: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Share count (signed).
    pub quantity: i64,
    /// Average cost per share.
    pub cost_price: Decimal,
    /// Last known market price. Falls back to `cost_price` when absent.
    #[serde(default)]
    pub current_price: Option<Decimal>,
    /// Beta against the market. Falls back to 1.0 when absent.
    #[serde(default)]
    pub beta: Option<Decimal>,
}

impl StockHolding {
    /// Create a stock lot with no market price or beta recorded.
    #[must_use]
    pub fn new(
        portfolio_id: PortfolioId,
        symbol: impl Into<String>,
        quantity: i64,
        cost_price: Decimal,
    ) -> Self {
        let symbol = symbol.into();
        Self {
            id: HoldingId::generate(),
            portfolio_id,
            name: symbol.clone(),
            symbol,
            quantity,
            cost_price,
            current_price: None,
            beta: None,
        }
    }

    /// Set the market price.
    #[must_use]
    pub const fn with_current_price(mut self, price: Decimal) -> Self {
        self.current_price = Some(price);
        self
    }

    /// Set the beta coefficient.
    #[must_use]
    pub const fn with_beta(mut self, beta: Decimal) -> Self {
        self.beta = Some(beta);
        self
    }

    /// Price used for valuation.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        self.current_price.unwrap_or(self.cost_price)
    }

    /// Beta used for weighting.
    #[must_use]
    pub fn effective_beta(&self) -> Decimal {
        self.beta.unwrap_or(Decimal::ONE)
    }

    /// `quantity × price`. Sign follows the quantity.
    #[must_use]
    pub fn market_value(&self) -> Money {
        Money::new(Decimal::from(self.quantity) * self.effective_price())
    }

    /// `quantity × cost_price`.
    #[must_use]
    pub fn cost_basis(&self) -> Money {
        Money::new(Decimal::from(self.quantity) * self.cost_price)
    }

    /// Unrealized P&L against cost.
    #[must_use]
    pub fn pnl(&self) -> HoldingPnl {
        let absolute = (self.effective_price() - self.cost_price) * Decimal::from(self.quantity);
        HoldingPnl::from_cost_basis(absolute, self.cost_basis().amount())
    }

    /// Reject structurally invalid lots.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` for an empty symbol or negative prices.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.symbol.trim().is_empty() {
            return Err(DomainError::invalid("symbol", "cannot be empty"));
        }
        if self.cost_price < Decimal::ZERO {
            return Err(DomainError::invalid("cost_price", "cannot be negative"));
        }
        if self.current_price.is_some_and(|p| p < Decimal::ZERO) {
            return Err(DomainError::invalid("current_price", "cannot be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn lot(quantity: i64, cost: Decimal) -> StockHolding {
        StockHolding::new(PortfolioId::new("pf-1"), "AAPL", quantity, cost)
    }

    #[test]
    fn market_value_uses_current_price() {
        let h = lot(100, dec!(150)).with_current_price(dec!(175.50));
        assert_eq!(h.market_value(), Money::new(dec!(17550)));
    }

    #[test]
    fn market_value_falls_back_to_cost() {
        let h = lot(100, dec!(150));
        assert_eq!(h.market_value(), Money::new(dec!(15000)));
    }

    #[test]
    fn short_stock_keeps_negative_sign() {
        let h = lot(-50, dec!(20)).with_current_price(dec!(22));
        assert_eq!(h.market_value(), Money::new(dec!(-1100)));
    }

    #[test]
    fn beta_defaults_to_one() {
        assert_eq!(lot(10, dec!(1)).effective_beta(), Decimal::ONE);
        assert_eq!(lot(10, dec!(1)).with_beta(dec!(1.3)).effective_beta(), dec!(1.3));
    }

    #[test]
    fn pnl_long_gain() {
        let h = lot(100, dec!(50)).with_current_price(dec!(60));
        let pnl = h.pnl();
        assert_eq!(pnl.absolute, Money::new(dec!(1000)));
        assert_eq!(pnl.percentage, dec!(20));
    }

    #[test]
    fn pnl_without_market_price_is_flat() {
        let pnl = lot(100, dec!(50)).pnl();
        assert_eq!(pnl.absolute, Money::ZERO);
        assert_eq!(pnl.percentage, Decimal::ZERO);
    }

    #[test]
    fn pnl_zero_cost_basis_has_zero_percentage() {
        let h = lot(100, Decimal::ZERO).with_current_price(dec!(5));
        assert_eq!(h.pnl().absolute, Money::new(dec!(500)));
        assert_eq!(h.pnl().percentage, Decimal::ZERO);
    }

    #[test]
    fn validate_rejects_negative_prices() {
        assert!(lot(1, dec!(-1)).validate().is_err());
        assert!(lot(1, dec!(1)).with_current_price(dec!(-0.01)).validate().is_err());
        assert!(lot(1, dec!(1)).validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_symbol() {
        let h = StockHolding::new(PortfolioId::new("pf-1"), " ", 1, dec!(1));
        assert!(h.validate().is_err());
    }
}
