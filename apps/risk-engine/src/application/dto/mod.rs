//! Data Transfer Objects (DTOs)
//!
//! DTOs are used for API boundaries and use case inputs/outputs.

mod holding_dto;
mod risk_dto;
mod rollover_dto;

pub use holding_dto::{ImportHoldingsRequest, ImportReport, OptionHoldingRecord, StockHoldingRecord};
pub use risk_dto::RiskMetricsDto;
pub use rollover_dto::RolloverCommand;
