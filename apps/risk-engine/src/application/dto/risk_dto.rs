//! Risk DTOs
//!
//! Presentation rounding happens here and nowhere else.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::risk_management::RiskMetrics;
use crate::domain::shared::Money;

/// Risk metrics as shown to clients.
///
/// Money is rendered to 2 decimal places, leverage and beta to 4, and
/// percentages to 2. Undefined liquidity renders as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetricsDto {
    /// Portfolio assessed.
    pub portfolio_id: String,
    /// `GREEN`, `YELLOW` or `RED`.
    pub risk_level: String,
    /// Leverage ratio.
    pub leverage_ratio: String,
    /// Portfolio beta.
    pub portfolio_beta: String,
    /// Max concentration percentage.
    pub max_concentration: String,
    /// Symbol carrying the max concentration.
    pub max_concentration_symbol: Option<String>,
    /// Margin usage percentage.
    pub margin_usage_ratio: String,
    /// Remaining liquidity percentage.
    pub remaining_liquidity: Option<String>,
    /// Stock market value.
    pub stock_value: String,
    /// Option max loss.
    pub option_max_loss: String,
    /// Option market value.
    pub option_market_value: String,
    /// Stock unrealized P&L.
    pub stock_unrealized_pnl: String,
    /// Option unrealized P&L.
    pub option_unrealized_pnl: String,
    /// Account equity.
    pub total_equity: String,
    /// Active option lots aggregated.
    pub active_option_count: usize,
    /// Assessment time.
    pub calculated_at: DateTime<Utc>,
}

fn fixed(value: Decimal, dp: u32) -> String {
    format!("{:.*}", dp as usize, value.round_dp(dp))
}

fn money(value: Money) -> String {
    fixed(value.amount(), 2)
}

impl From<&RiskMetrics> for RiskMetricsDto {
    fn from(r: &RiskMetrics) -> Self {
        let m = &r.metrics;
        Self {
            portfolio_id: r.portfolio_id.to_string(),
            risk_level: r.risk_level.to_string(),
            leverage_ratio: fixed(m.leverage_ratio, 4),
            portfolio_beta: fixed(m.portfolio_beta, 4),
            max_concentration: fixed(m.max_concentration, 2),
            max_concentration_symbol: m.max_concentration_symbol.clone(),
            margin_usage_ratio: fixed(m.margin_usage_ratio, 2),
            remaining_liquidity: m.remaining_liquidity.map(|l| fixed(l, 2)),
            stock_value: money(m.stock_value),
            option_max_loss: money(m.option_max_loss),
            option_market_value: money(m.option_market_value),
            stock_unrealized_pnl: money(m.stock_unrealized_pnl),
            option_unrealized_pnl: money(m.option_unrealized_pnl),
            total_equity: money(m.total_equity),
            active_option_count: m.active_option_count,
            calculated_at: r.calculated_at,
        }
    }
}
