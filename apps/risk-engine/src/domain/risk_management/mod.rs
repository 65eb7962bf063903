//! Risk Management Bounded Context
//!
//! Turns a portfolio and its holdings into leverage, concentration and
//! liquidity metrics, a discrete risk tier and an advisory suggestion list.
//!
//! # Key Concepts
//!
//! - **Max Loss**: Conservative worst-case loss per option lot
//! - **Aggregation**: Portfolio-level roll-up of lot values
//! - **Classification**: GREEN / YELLOW / RED tiering against thresholds
//! - **Suggestions**: Rule-based advice derived from the same metrics
//!
//! Everything here is pure and synchronous. Independent portfolios can be
//! assessed in parallel.

pub mod services;
pub mod value_objects;

pub use services::{
    MaxLossEstimator, PortfolioAggregator, RiskClassifier, RiskEngine, SuggestionGenerator,
    SuggestionRules,
};
pub use value_objects::{
    AggregatedMetrics, PortfolioHoldings, RiskLevel, RiskMetrics, RiskThresholds, Suggestion,
    SuggestionAction, SuggestionCategory, SuggestionContext, SuggestionPriority, TieringPolicy,
};
