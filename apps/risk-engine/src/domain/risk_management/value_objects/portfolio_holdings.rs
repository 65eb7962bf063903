//! Input bundle for one portfolio assessment.

use serde::{Deserialize, Serialize};

use crate::domain::holdings::{OptionHolding, Portfolio, StockHolding};

/// A portfolio together with its stock and option lots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioHoldings {
    /// Cash and margin state.
    pub portfolio: Portfolio,
    /// Stock lots.
    pub stocks: Vec<StockHolding>,
    /// Option lots of any status. Non-active lots are ignored by aggregation.
    pub options: Vec<OptionHolding>,
}

impl PortfolioHoldings {
    /// Bundle a portfolio with its lots.
    #[must_use]
    pub const fn new(
        portfolio: Portfolio,
        stocks: Vec<StockHolding>,
        options: Vec<OptionHolding>,
    ) -> Self {
        Self {
            portfolio,
            stocks,
            options,
        }
    }
}
