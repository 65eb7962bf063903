//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod access;
mod assess_risk;
mod import_holdings;
mod roll_option;
mod rollover_history;

pub use assess_risk::AssessRiskUseCase;
pub use import_holdings::ImportHoldingsUseCase;
pub use roll_option::{RollOptionUseCase, RolloverOutcome};
pub use rollover_history::{RolloverHistory, RolloverHistoryUseCase};
