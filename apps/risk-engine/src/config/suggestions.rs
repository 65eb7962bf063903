//! Suggestion rule configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::risk_management::services::{SuggestionGenerator, SuggestionRules};

/// Limits that trigger advisory suggestions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Single-stock concentration limit, in percent.
    #[serde(default = "default_concentration_limit")]
    pub concentration_limit: Decimal,
    /// Concentration below which a reduction is only MEDIUM, in percent.
    /// Unset means every breach is HIGH.
    #[serde(default)]
    pub concentration_high_limit: Option<Decimal>,
    /// Target remaining liquidity, in percent.
    #[serde(default = "default_liquidity_target")]
    pub liquidity_target: Decimal,
    /// Critical remaining liquidity, in percent.
    #[serde(default = "default_liquidity_critical")]
    pub liquidity_critical: Decimal,
    /// Days to expiry that need handling now.
    #[serde(default = "default_expiration_urgent_days")]
    pub expiration_urgent_days: i64,
    /// Days to expiry that make an option a rollover candidate.
    #[serde(default = "default_rollover_window_days")]
    pub rollover_window_days: i64,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            concentration_limit: default_concentration_limit(),
            concentration_high_limit: None,
            liquidity_target: default_liquidity_target(),
            liquidity_critical: default_liquidity_critical(),
            expiration_urgent_days: default_expiration_urgent_days(),
            rollover_window_days: default_rollover_window_days(),
        }
    }
}

impl SuggestionConfig {
    /// Generator configured from these settings.
    #[must_use]
    pub const fn generator(&self) -> SuggestionGenerator {
        SuggestionGenerator::new(SuggestionRules {
            concentration_limit: self.concentration_limit,
            concentration_high_limit: self.concentration_high_limit,
            liquidity_target: self.liquidity_target,
            liquidity_critical: self.liquidity_critical,
            expiration_urgent_days: self.expiration_urgent_days,
            rollover_window_days: self.rollover_window_days,
        })
    }
}

const fn default_concentration_limit() -> Decimal {
    dec!(20)
}

const fn default_liquidity_target() -> Decimal {
    dec!(30)
}

const fn default_liquidity_critical() -> Decimal {
    dec!(15)
}

const fn default_expiration_urgent_days() -> i64 {
    7
}

const fn default_rollover_window_days() -> i64 {
    60
}
