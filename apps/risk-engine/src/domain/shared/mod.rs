//! Shared Domain Types
//!
//! Value objects and errors shared across bounded contexts.

pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::{HoldingId, Money, PortfolioId, RolloverId, UserId, percent_of};
