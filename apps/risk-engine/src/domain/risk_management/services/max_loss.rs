//! Worst-case loss per option lot.
//!
//! A fixed heuristic rather than a pricing model. Short calls are priced at a
//! multiple of underlying notional because their loss is unbounded.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::holdings::{Direction, OptionHolding, OptionType};
use crate::domain::shared::{DomainError, Money};

/// Default notional multiple applied to short calls.
pub const DEFAULT_SHORT_CALL_MULTIPLIER: Decimal = dec!(3);

/// Estimates the maximum loss of a single option lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxLossEstimator {
    short_call_multiplier: Decimal,
}

impl Default for MaxLossEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_SHORT_CALL_MULTIPLIER)
    }
}

impl MaxLossEstimator {
    /// Create an estimator with the given short call multiplier.
    #[must_use]
    pub const fn new(short_call_multiplier: Decimal) -> Self {
        Self {
            short_call_multiplier,
        }
    }

    /// Short call multiplier in use.
    #[must_use]
    pub const fn short_call_multiplier(&self) -> Decimal {
        self.short_call_multiplier
    }

    /// Worst-case loss of `holding`.
    ///
    /// `underlying_price` is the current price of the matching stock lot, if
    /// the portfolio holds one. It only matters for short calls, which fall
    /// back to the strike when it is absent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if the loss does not fit in a `Decimal`.
    pub fn estimate(
        &self,
        holding: &OptionHolding,
        underlying_price: Option<Decimal>,
    ) -> Result<Money, DomainError> {
        let shares = holding.share_equivalent();
        match (holding.direction, holding.option_type) {
            (Direction::Buy, _) => {
                Ok(Money::new(product(&[holding.cost_price, shares])?).floor_zero())
            }
            (Direction::Sell, OptionType::Put) => {
                let per_share = holding
                    .strike_price
                    .checked_sub(holding.cost_price)
                    .ok_or_else(overflow)?;
                Ok(Money::new(product(&[per_share, shares])?).floor_zero())
            }
            (Direction::Sell, OptionType::Call) => {
                let exposure = underlying_price.unwrap_or(holding.strike_price);
                let loss = product(&[exposure, self.short_call_multiplier, shares])?;
                Ok(Money::new(loss))
            }
        }
    }
}

fn product(factors: &[Decimal]) -> Result<Decimal, DomainError> {
    factors
        .iter()
        .try_fold(Decimal::ONE, |acc, f| acc.checked_mul(*f))
        .ok_or_else(overflow)
}

fn overflow() -> DomainError {
    DomainError::invalid("max_loss", "exceeds representable range")
}
