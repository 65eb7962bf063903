//! Classifier thresholds and tiering policy.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Breach thresholds for each risk factor.
///
/// Leverage and concentration breach at or above the threshold; liquidity
/// breaches strictly below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Leverage ratio at which the tier becomes RED.
    pub red_leverage: Decimal,
    /// Leverage ratio at which the tier becomes YELLOW.
    pub yellow_leverage: Decimal,
    /// Max concentration percentage at which the tier becomes RED.
    pub red_concentration: Decimal,
    /// Max concentration percentage at which the tier becomes YELLOW.
    pub yellow_concentration: Decimal,
    /// Remaining liquidity percentage below which the tier becomes RED.
    pub red_liquidity: Decimal,
    /// Remaining liquidity percentage below which the tier becomes YELLOW.
    pub yellow_liquidity: Decimal,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            red_leverage: dec!(1.5),
            yellow_leverage: dec!(1.0),
            red_concentration: dec!(20),
            yellow_concentration: dec!(10),
            red_liquidity: dec!(15),
            yellow_liquidity: dec!(30),
        }
    }
}

/// Which factors participate in tiering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TieringPolicy {
    /// Leverage, concentration and remaining liquidity.
    #[default]
    ThreeFactor,
    /// Leverage only. Kept for callers that tier on leverage alone.
    LeverageOnly,
}
