//! Risk tiering configuration.
//!
//! These are the per-deployment risk settings. Defaults reproduce the
//! canonical three-factor policy.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::risk_management::services::{
    MaxLossEstimator, PortfolioAggregator, RiskClassifier, RiskEngine,
};
use crate::domain::risk_management::value_objects::{RiskThresholds, TieringPolicy};

/// Classifier thresholds, tiering policy and max-loss tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Leverage ratio that makes a portfolio RED.
    #[serde(default = "default_red_leverage")]
    pub red_leverage: Decimal,
    /// Leverage ratio that makes a portfolio YELLOW.
    #[serde(default = "default_yellow_leverage")]
    pub yellow_leverage: Decimal,
    /// Concentration percentage that makes a portfolio RED.
    #[serde(default = "default_red_concentration")]
    pub red_concentration: Decimal,
    /// Concentration percentage that makes a portfolio YELLOW.
    #[serde(default = "default_yellow_concentration")]
    pub yellow_concentration: Decimal,
    /// Remaining liquidity percentage below which a portfolio is RED.
    #[serde(default = "default_red_liquidity")]
    pub red_liquidity: Decimal,
    /// Remaining liquidity percentage below which a portfolio is YELLOW.
    #[serde(default = "default_yellow_liquidity")]
    pub yellow_liquidity: Decimal,
    /// Factors used for tiering.
    #[serde(default)]
    pub policy: TieringPolicy,
    /// Notional multiple applied to short calls.
    #[serde(default = "default_short_call_multiplier")]
    pub short_call_multiplier: Decimal,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            red_leverage: default_red_leverage(),
            yellow_leverage: default_yellow_leverage(),
            red_concentration: default_red_concentration(),
            yellow_concentration: default_yellow_concentration(),
            red_liquidity: default_red_liquidity(),
            yellow_liquidity: default_yellow_liquidity(),
            policy: TieringPolicy::default(),
            short_call_multiplier: default_short_call_multiplier(),
        }
    }
}

impl RiskConfig {
    /// Classifier thresholds.
    #[must_use]
    pub const fn thresholds(&self) -> RiskThresholds {
        RiskThresholds {
            red_leverage: self.red_leverage,
            yellow_leverage: self.yellow_leverage,
            red_concentration: self.red_concentration,
            yellow_concentration: self.yellow_concentration,
            red_liquidity: self.red_liquidity,
            yellow_liquidity: self.yellow_liquidity,
        }
    }

    /// Risk engine configured from these settings.
    #[must_use]
    pub const fn engine(&self) -> RiskEngine {
        RiskEngine::new(
            PortfolioAggregator::new(MaxLossEstimator::new(self.short_call_multiplier)),
            RiskClassifier::new(self.thresholds(), self.policy),
        )
    }
}

const fn default_red_leverage() -> Decimal {
    dec!(1.5)
}

const fn default_yellow_leverage() -> Decimal {
    dec!(1.0)
}

const fn default_red_concentration() -> Decimal {
    dec!(20)
}

const fn default_yellow_concentration() -> Decimal {
    dec!(10)
}

const fn default_red_liquidity() -> Decimal {
    dec!(15)
}

const fn default_yellow_liquidity() -> Decimal {
    dec!(30)
}

const fn default_short_call_multiplier() -> Decimal {
    dec!(3)
}
