//! Advisory suggestions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::HoldingId;

/// Broad grouping of a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestionCategory {
    /// Needs attention now.
    Immediate,
    /// Routine option position management.
    OptionManagement,
}

/// Urgency of a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestionPriority {
    /// Act soon.
    High,
    /// Worth reviewing.
    Medium,
    /// Informational.
    Low,
}

/// Action the user is advised to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestionAction {
    /// Trim an over-concentrated stock.
    ReducePosition,
    /// Raise the cash buffer.
    IncreaseCash,
    /// Close, exercise or roll an option about to expire.
    HandleExpiration,
    /// Roll an option to a later expiry.
    RolloverOption,
}

/// Facts behind a suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestionContext {
    /// A stock above the concentration limit.
    Concentration {
        /// Ticker.
        symbol: String,
        /// Share of stock value, in percent.
        current_concentration: Decimal,
        /// Percentage points above the limit.
        excess: Decimal,
        /// Shares to sell to get back under the limit.
        suggested_reduction: i64,
    },
    /// Remaining liquidity below target.
    Liquidity {
        /// Current remaining liquidity, in percent.
        current_liquidity: Decimal,
        /// Target remaining liquidity, in percent.
        target_liquidity: Decimal,
    },
    /// An option approaching expiry.
    Expiration {
        /// Option lot.
        holding_id: HoldingId,
        /// Option symbol.
        option_symbol: String,
        /// Whole days until expiry.
        days_to_expiration: i64,
    },
}

/// One advisory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Grouping.
    pub category: SuggestionCategory,
    /// Urgency.
    pub priority: SuggestionPriority,
    /// Short headline.
    pub title: String,
    /// Human-readable explanation.
    pub description: String,
    /// Advised action.
    pub action: SuggestionAction,
    /// Supporting facts.
    pub context: SuggestionContext,
}
