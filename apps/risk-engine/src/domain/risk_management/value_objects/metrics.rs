//! Aggregated portfolio metrics.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::RiskLevel;
use crate::domain::shared::{Money, PortfolioId};

/// Portfolio-level roll-up of lot values, at full precision.
///
/// Rounding happens only at the presentation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedMetrics {
    /// Account equity.
    pub total_equity: Money,
    /// Sum of stock market values.
    pub stock_value: Money,
    /// Sum of worst-case losses over active option lots.
    pub option_max_loss: Money,
    /// Signed mark-to-market of active option lots.
    pub option_market_value: Money,
    /// Unrealized P&L over stock lots.
    pub stock_unrealized_pnl: Money,
    /// Unrealized P&L over active option lots.
    pub option_unrealized_pnl: Money,
    /// Value-weighted beta of the stock book.
    pub portfolio_beta: Decimal,
    /// Largest single stock share of stock value, in percent.
    pub max_concentration: Decimal,
    /// Symbol carrying `max_concentration`.
    pub max_concentration_symbol: Option<String>,
    /// Margin used over equity, in percent.
    pub margin_usage_ratio: Decimal,
    /// Equity not tied up in margin, in percent. `None` when equity is zero.
    pub remaining_liquidity: Option<Decimal>,
    /// Stock value plus option max loss, over equity.
    pub leverage_ratio: Decimal,
    /// Number of active option lots that were aggregated.
    pub active_option_count: usize,
}

/// Result of one risk assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Portfolio assessed.
    pub portfolio_id: PortfolioId,
    /// Tier assigned by the classifier.
    pub risk_level: RiskLevel,
    /// Underlying roll-up.
    pub metrics: AggregatedMetrics,
    /// When the assessment ran.
    pub calculated_at: DateTime<Utc>,
}
