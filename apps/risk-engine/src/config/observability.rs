//! Observability configuration for logging and metrics.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::observability::MetricsConfig;

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Start the Prometheus exporter.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
    /// Prometheus listener address.
    #[serde(default = "default_metrics_addr")]
    pub metrics_addr: String,
    /// Log level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            metrics_addr: default_metrics_addr(),
            log_level: default_log_level(),
        }
    }
}

impl ObservabilityConfig {
    /// Metrics exporter settings.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if `metrics_addr` is not a socket address.
    pub fn metrics_config(&self) -> Result<MetricsConfig, ConfigError> {
        let addr: SocketAddr = self.metrics_addr.parse().map_err(|_| {
            ConfigError::ValidationError(format!(
                "observability.metrics_addr '{}' is not a socket address",
                self.metrics_addr
            ))
        })?;
        Ok(MetricsConfig::with_addr(addr))
    }
}

const fn default_true() -> bool {
    true
}

fn default_metrics_addr() -> String {
    "0.0.0.0:9090".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
