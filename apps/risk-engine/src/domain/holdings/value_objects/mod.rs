//! Holdings Value Objects

mod option_terms;
mod pnl;

pub use option_terms::{CONTRACT_MULTIPLIER, Direction, OptionStatus, OptionType};
pub use pnl::HoldingPnl;
