//! Option lot terms: right, direction and lifecycle status.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Underlying shares represented by one equity option contract.
pub const CONTRACT_MULTIPLIER: Decimal = Decimal::ONE_HUNDRED;

/// Option right (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionType {
    /// Call option (right to buy).
    Call,
    /// Put option (right to sell).
    Put,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => write!(f, "CALL"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

/// Whether the lot was bought (long) or sold (short).
///
/// Contract counts are always positive; the sign of the position lives here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// Long the option (premium paid).
    Buy,
    /// Short the option (premium received).
    Sell,
}

impl Direction {
    /// +1 for long lots, -1 for short lots.
    #[must_use]
    pub const fn sign(self) -> Decimal {
        match self {
            Self::Buy => Decimal::ONE,
            Self::Sell => Decimal::NEGATIVE_ONE,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Lifecycle status of an option lot.
///
/// ```text
/// ACTIVE ──rollover──► ROLLED
///   │  ◄──compensate──┘
///   └──────close─────► CLOSED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionStatus {
    /// Open position, included in aggregation.
    #[default]
    Active,
    /// Closed by a rollover into a replacement lot.
    Rolled,
    /// Closed outright.
    Closed,
}

impl OptionStatus {
    /// Only active lots take part in risk aggregation.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Check whether `self -> next` is a legal transition.
    ///
    /// `ROLLED -> ACTIVE` exists solely for rollover compensation.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Active, Self::Rolled | Self::Closed) | (Self::Rolled, Self::Active)
        )
    }
}

impl fmt::Display for OptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Rolled => write!(f, "ROLLED"),
            Self::Closed => write!(f, "CLOSED"),
        }
    }
}
