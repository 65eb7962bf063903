//! Three-tier risk classification.

use rust_decimal::Decimal;

use crate::domain::risk_management::value_objects::{RiskLevel, RiskThresholds, TieringPolicy};

/// Maps aggregated metrics onto a [`RiskLevel`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskClassifier {
    thresholds: RiskThresholds,
    policy: TieringPolicy,
}

impl RiskClassifier {
    /// Create a classifier.
    #[must_use]
    pub const fn new(thresholds: RiskThresholds, policy: TieringPolicy) -> Self {
        Self { thresholds, policy }
    }

    /// Thresholds in use.
    #[must_use]
    pub const fn thresholds(&self) -> &RiskThresholds {
        &self.thresholds
    }

    /// Policy in use.
    #[must_use]
    pub const fn policy(&self) -> TieringPolicy {
        self.policy
    }

    /// Classify one portfolio. RED is checked first; any single breach decides.
    ///
    /// An undefined `remaining_liquidity` (zero equity) never breaches.
    #[must_use]
    pub fn classify(
        &self,
        leverage_ratio: Decimal,
        max_concentration: Decimal,
        remaining_liquidity: Option<Decimal>,
    ) -> RiskLevel {
        let t = &self.thresholds;
        let three_factor = self.policy == TieringPolicy::ThreeFactor;
        let liquidity_below = |limit: Decimal| remaining_liquidity.is_some_and(|l| l < limit);

        if leverage_ratio >= t.red_leverage
            || (three_factor
                && (max_concentration >= t.red_concentration || liquidity_below(t.red_liquidity)))
        {
            RiskLevel::Red
        } else if leverage_ratio >= t.yellow_leverage
            || (three_factor
                && (max_concentration >= t.yellow_concentration
                    || liquidity_below(t.yellow_liquidity)))
        {
            RiskLevel::Yellow
        } else {
            RiskLevel::Green
        }
    }
}
