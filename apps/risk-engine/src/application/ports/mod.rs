//! Application Ports (Driven)
//!
//! Ports define interfaces for interacting with external systems. The engine
//! owns no storage; everything it reads or writes goes through these traits.

mod holdings_store_port;

pub use holdings_store_port::{HoldingsStore, OptionHoldingPatch, StoreError};
