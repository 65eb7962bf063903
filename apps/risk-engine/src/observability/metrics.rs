//! Prometheus metrics for the risk engine.
//!
//! # Example
//!
//! ```ignore
//! use risk_engine::observability::{init_metrics, MetricsConfig};
//!
//! init_metrics(&MetricsConfig::default())?;
//! record_rollover("completed");
//! ```

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::{Ipv4Addr, SocketAddr};

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Address to bind the metrics HTTP listener.
    pub listen_addr: SocketAddr,
    /// Histogram buckets for assessment latency (in seconds).
    pub latency_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 9090)),
            // 10us to 100ms; assessments are pure arithmetic
            latency_buckets: vec![
                0.000_01, 0.000_05, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1,
            ],
        }
    }
}

impl MetricsConfig {
    /// Create a new metrics configuration with custom address.
    #[must_use]
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            listen_addr: addr,
            ..Default::default()
        }
    }
}

/// Initialize the Prometheus metrics exporter.
///
/// This starts an HTTP server that exposes metrics at `/metrics`.
///
/// # Errors
///
/// Returns an error if the metrics exporter fails to start (e.g., port already in use).
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .set_buckets(&config.latency_buckets)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(
        addr = %config.listen_addr,
        "Prometheus metrics exporter started"
    );

    Ok(())
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

// ============================================================================
// Risk Metrics
// ============================================================================

/// Record a completed risk assessment.
///
/// # Arguments
///
/// * `level` - Resulting tier (`"GREEN"`, `"YELLOW"`, `"RED"`)
/// * `duration_seconds` - Time spent aggregating and classifying
pub fn record_risk_assessment(level: &str, duration_seconds: f64) {
    counter!("risk_assessments_total", "level" => level.to_string()).increment(1);
    histogram!("risk_assessment_duration_seconds").record(duration_seconds);
}

/// Record the number of suggestions produced for one portfolio.
pub fn record_suggestions(count: usize) {
    counter!("risk_suggestions_total").increment(count as u64);
}

// ============================================================================
// Rollover Metrics
// ============================================================================

/// Record the outcome of a rollover.
///
/// # Arguments
///
/// * `outcome` - `"completed"`, `"rejected"` or `"rolled_back"`
pub fn record_rollover(outcome: &str) {
    counter!("option_rollovers_total", "outcome" => outcome.to_string()).increment(1);
}

/// Record a compensating action taken after a failed rollover step.
///
/// # Arguments
///
/// * `step` - Compensation performed (e.g., `"delete_new_holding"`)
/// * `ok` - Whether the compensation itself succeeded
pub fn record_compensation(step: &str, ok: bool) {
    counter!(
        "rollover_compensations_total",
        "step" => step.to_string(),
        "result" => if ok { "ok" } else { "failed" }
    )
    .increment(1);
}

// ============================================================================
// Ingestion Metrics
// ============================================================================

/// Record option rows whose signed contract counts were normalized on import.
pub fn record_contract_normalization(count: usize) {
    counter!("contract_normalizations_total").increment(count as u64);
}
