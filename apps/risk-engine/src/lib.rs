// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Risk Engine - Rust Core Library
//!
//! Deterministic portfolio risk engine: lot valuation, option worst-case loss,
//! portfolio aggregation, GREEN / YELLOW / RED tiering, advisory suggestions
//! and a compensating option rollover ledger.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Pure business logic
//!   - `holdings`: Portfolio, stock and option lots, rollover records
//!   - `risk_management`: Max loss, aggregation, classification, suggestions
//!   - `option_rollover`: Rollover terms and the writes a rollover performs
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: `HoldingsStore` interface for the external store
//!   - `use_cases`: `AssessRisk`, `RollOption`, `RolloverHistory`, `ImportHoldings`
//!   - `dto`: Commands, import records and serialized risk metrics
//!
//! - **Infrastructure**: Adapters
//!   - `persistence`: In-memory holdings store
//!
//! Cross-cutting: `config` (YAML settings), `error` (caller-facing error
//! codes), `observability` (Prometheus metrics), `telemetry` (tracing).

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting Concerns
// =============================================================================

pub mod config;
pub mod error;
pub mod observability;
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::holdings::{
    Direction, OptionHolding, OptionStatus, OptionType, Portfolio, RolloverRecord, StockHolding,
};
pub use domain::risk_management::{
    AggregatedMetrics, RiskEngine, RiskLevel, RiskMetrics, Suggestion, SuggestionGenerator,
};
pub use domain::shared::{DomainError, HoldingId, Money, PortfolioId, RolloverId, UserId};

// Application re-exports
pub use application::dto::{ImportHoldingsRequest, ImportReport, RiskMetricsDto, RolloverCommand};
pub use application::ports::{HoldingsStore, OptionHoldingPatch, StoreError};
pub use application::use_cases::{
    AssessRiskUseCase, ImportHoldingsUseCase, RollOptionUseCase, RolloverHistoryUseCase,
    RolloverOutcome,
};

// Infrastructure re-exports
pub use infrastructure::persistence::InMemoryHoldingsStore;

pub use config::{Config, ConfigError, load_config};
pub use error::{EngineError, ErrorCode};
