//! Persistence Adapters
//!
//! Implementations of [`crate::application::ports::HoldingsStore`].

pub mod in_memory;

pub use in_memory::InMemoryHoldingsStore;
