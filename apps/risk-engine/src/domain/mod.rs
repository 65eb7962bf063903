//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Entities**: Portfolios, stock lots, option lots and rollover records
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Domain Services**: Stateless calculations over holdings
//!
//! # Bounded Contexts
//!
//! - [`holdings`]: Lot-level valuation and option lifecycle
//! - [`risk_management`]: Max loss, aggregation, classification and suggestions
//! - [`option_rollover`]: Rules for closing one option lot and opening its replacement

pub mod holdings;
pub mod option_rollover;
pub mod risk_management;
pub mod shared;
