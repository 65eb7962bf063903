//! Holdings Bounded Context
//!
//! Portfolios, stock lots, option lots and the rollover ledger entries that
//! link option lots together. Values here are per-lot; portfolio roll-ups
//! live in [`crate::domain::risk_management`].

pub mod aggregate;
pub mod value_objects;

pub use aggregate::{OptionHolding, Portfolio, RolloverRecord, StockHolding};
pub use value_objects::{CONTRACT_MULTIPLIER, Direction, HoldingPnl, OptionStatus, OptionType};
