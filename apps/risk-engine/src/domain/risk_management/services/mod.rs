//! Risk Management Domain Services

mod aggregator;
mod classifier;
mod max_loss;
mod risk_engine;
mod suggestion_generator;

pub use aggregator::PortfolioAggregator;
pub use classifier::RiskClassifier;
pub use max_loss::MaxLossEstimator;
pub use risk_engine::RiskEngine;
pub use suggestion_generator::{SuggestionGenerator, SuggestionRules};
