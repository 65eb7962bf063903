//! Observability module for metrics.
//!
//! Prometheus export plus recording helpers for risk assessments, rollovers
//! and holdings ingestion. Tracing setup lives in [`crate::telemetry`].

mod metrics;

pub use metrics::{
    MetricsConfig, MetricsError, init_metrics, record_compensation,
    record_contract_normalization, record_risk_assessment, record_rollover, record_suggestions,
};
