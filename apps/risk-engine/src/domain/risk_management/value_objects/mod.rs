//! Risk Management Value Objects

mod metrics;
mod portfolio_holdings;
mod risk_level;
mod suggestion;
mod thresholds;

pub use metrics::{AggregatedMetrics, RiskMetrics};
pub use portfolio_holdings::PortfolioHoldings;
pub use risk_level::RiskLevel;
pub use suggestion::{
    Suggestion, SuggestionAction, SuggestionCategory, SuggestionContext, SuggestionPriority,
};
pub use thresholds::{RiskThresholds, TieringPolicy};
