//! Option Rollover Bounded Context
//!
//! Pure rules for closing one option lot and opening its replacement. The
//! multi-step store interaction and its compensation live in the
//! application layer; this module decides what those steps write.

mod plan;
mod terms;

pub use plan::{RolloverPlan, realized_pnl};
pub use terms::RolloverTerms;
