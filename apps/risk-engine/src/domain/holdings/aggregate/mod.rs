//! Holdings entities.

mod option_holding;
mod portfolio;
mod rollover_record;
mod stock_holding;

pub use option_holding::OptionHolding;
pub use portfolio::Portfolio;
pub use rollover_record::RolloverRecord;
pub use stock_holding::StockHolding;
