//! Rule-based advisory suggestions.
//!
//! Output is advisory only and never persisted. Items are emitted in rule
//! order (stocks, then liquidity, then options) without sorting or dedup.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::holdings::{OptionHolding, StockHolding};
use crate::domain::risk_management::value_objects::{
    AggregatedMetrics, Suggestion, SuggestionAction, SuggestionCategory, SuggestionContext,
    SuggestionPriority,
};
use crate::domain::shared::percent_of;

/// Limits that trigger suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRules {
    /// Single-stock share of stock value above which a reduction is advised, in percent.
    pub concentration_limit: Decimal,
    /// Share below which a reduction is MEDIUM rather than HIGH, in percent.
    /// Unset by default, so every breach is HIGH.
    pub concentration_high_limit: Option<Decimal>,
    /// Remaining liquidity below which more cash is advised, in percent.
    pub liquidity_target: Decimal,
    /// Remaining liquidity below which the cash suggestion becomes HIGH, in percent.
    pub liquidity_critical: Decimal,
    /// Options expiring within this many days need handling now.
    pub expiration_urgent_days: i64,
    /// Options expiring within this many days are rollover candidates.
    pub rollover_window_days: i64,
}

impl Default for SuggestionRules {
    fn default() -> Self {
        Self {
            concentration_limit: dec!(20),
            concentration_high_limit: None,
            liquidity_target: dec!(30),
            liquidity_critical: dec!(15),
            expiration_urgent_days: 7,
            rollover_window_days: 60,
        }
    }
}

/// Derives suggestions from aggregated metrics and raw holdings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuggestionGenerator {
    rules: SuggestionRules,
}

impl SuggestionGenerator {
    /// Create a generator.
    #[must_use]
    pub const fn new(rules: SuggestionRules) -> Self {
        Self { rules }
    }

    /// Rules in use.
    #[must_use]
    pub const fn rules(&self) -> &SuggestionRules {
        &self.rules
    }

    /// Produce suggestions as of `now`.
    #[must_use]
    pub fn generate(
        &self,
        metrics: &AggregatedMetrics,
        stocks: &[StockHolding],
        options: &[OptionHolding],
        now: DateTime<Utc>,
    ) -> Vec<Suggestion> {
        let mut suggestions: Vec<Suggestion> = stocks
            .iter()
            .filter_map(|s| self.concentration(s, metrics))
            .collect();
        suggestions.extend(self.liquidity(metrics));
        suggestions.extend(
            options
                .iter()
                .filter(|o| o.status.is_active())
                .filter_map(|o| self.expiration(o, now)),
        );
        suggestions
    }

    fn concentration(&self, stock: &StockHolding, metrics: &AggregatedMetrics) -> Option<Suggestion> {
        let limit = self.rules.concentration_limit;
        let concentration =
            percent_of(stock.market_value().amount(), metrics.stock_value.amount())?;
        if concentration <= limit {
            return None;
        }

        let excess = concentration - limit;
        let suggested_reduction = (excess / Decimal::ONE_HUNDRED * Decimal::from(stock.quantity))
            .ceil()
            .to_i64()
            .unwrap_or(stock.quantity);
        let priority = match self.rules.concentration_high_limit {
            Some(high) if concentration < high => SuggestionPriority::Medium,
            _ => SuggestionPriority::High,
        };

        Some(Suggestion {
            category: SuggestionCategory::Immediate,
            priority,
            title: format!("Reduce {} position", stock.symbol),
            description: format!(
                "{} is {}% of stock value, above the {}% limit. Consider selling {} shares.",
                stock.symbol,
                concentration.round_dp(1),
                limit,
                suggested_reduction
            ),
            action: SuggestionAction::ReducePosition,
            context: SuggestionContext::Concentration {
                symbol: stock.symbol.clone(),
                current_concentration: concentration,
                excess,
                suggested_reduction,
            },
        })
    }

    fn liquidity(&self, metrics: &AggregatedMetrics) -> Option<Suggestion> {
        let liquidity = metrics.remaining_liquidity?;
        let target = self.rules.liquidity_target;
        if liquidity >= target {
            return None;
        }

        let priority = if liquidity < self.rules.liquidity_critical {
            SuggestionPriority::High
        } else {
            SuggestionPriority::Medium
        };

        Some(Suggestion {
            category: SuggestionCategory::Immediate,
            priority,
            title: "Increase cash buffer".to_string(),
            description: format!(
                "Remaining liquidity is {}%, below the {}% target. Reduce positions or pause new investments.",
                liquidity.round_dp(1),
                target
            ),
            action: SuggestionAction::IncreaseCash,
            context: SuggestionContext::Liquidity {
                current_liquidity: liquidity,
                target_liquidity: target,
            },
        })
    }

    fn expiration(&self, option: &OptionHolding, now: DateTime<Utc>) -> Option<Suggestion> {
        let days = option.days_to_expiration(now);
        let context = SuggestionContext::Expiration {
            holding_id: option.id.clone(),
            option_symbol: option.option_symbol.clone(),
            days_to_expiration: days,
        };

        if days > 0 && days <= self.rules.expiration_urgent_days {
            Some(Suggestion {
                category: SuggestionCategory::Immediate,
                priority: SuggestionPriority::High,
                title: format!("{} option expiring soon", option.underlying_symbol),
                description: format!(
                    "{} expires in {days} days. Close, roll or prepare for assignment.",
                    option.option_symbol
                ),
                action: SuggestionAction::HandleExpiration,
                context,
            })
        } else if days > self.rules.expiration_urgent_days
            && days <= self.rules.rollover_window_days
        {
            Some(Suggestion {
                category: SuggestionCategory::OptionManagement,
                priority: SuggestionPriority::Medium,
                title: format!(
                    "Consider rolling {} {}",
                    option.underlying_symbol, option.option_type
                ),
                description: format!(
                    "{} expires in {days} days. Consider rolling to a later expiration.",
                    option.option_symbol
                ),
                action: SuggestionAction::RolloverOption,
                context,
            })
        } else {
            None
        }
    }
}
