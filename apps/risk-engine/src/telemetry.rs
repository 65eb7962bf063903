//! Tracing Setup
//!
//! Installs the `tracing` subscriber, optionally with an OTLP span exporter.
//!
//! # Configuration
//!
//! - `RUST_LOG`: filter directives (falls back to the configured log level)
//! - `OTEL_ENABLED`: set to `true` to export spans over OTLP
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP gRPC endpoint (default: `http://localhost:4317`)
//! - `OTEL_SERVICE_NAME`: service name for traces (default: `risk-engine`)
//!
//! The OTLP exporter needs a Tokio runtime, so call [`init_telemetry`] from
//! inside one when exporting is enabled.
//!
//! # Usage
//!
//! ```rust,ignore
//! use risk_engine::telemetry::init_telemetry;
//!
//! #[tokio::main]
//! async fn main() {
//!     let _guard = init_telemetry("info");
//!     // ... application code
//! }
//! ```

use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_SERVICE_NAME: &str = "risk-engine";
const DEFAULT_OTLP_ENDPOINT: &str = "http://localhost:4317";

/// Guard that shuts down the tracer provider on drop.
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    /// Whether spans are being exported over OTLP.
    #[must_use]
    pub const fn is_exporting(&self) -> bool {
        self.provider.is_some()
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("Error shutting down tracer provider: {e:?}");
        }
    }
}

/// Install the global subscriber.
///
/// `default_level` is used when `RUST_LOG` is unset or invalid. If a
/// subscriber is already installed this is a no-op apart from the returned
/// guard, so tests may call it repeatedly.
#[must_use]
pub fn init_telemetry(default_level: &str) -> TelemetryGuard {
    let otel_enabled = std::env::var("OTEL_ENABLED").is_ok_and(|v| v == "true");

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if !otel_enabled {
        let installed = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .try_init()
            .is_ok();
        if installed {
            tracing::debug!("OpenTelemetry disabled, using console logging only");
        }
        return TelemetryGuard { provider: None };
    }

    let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .unwrap_or_else(|_| DEFAULT_OTLP_ENDPOINT.to_string());
    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string());

    let exporter = match opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint)
        .build()
    {
        Ok(exp) => exp,
        Err(e) => {
            eprintln!("Failed to create OTLP exporter: {e:?}, falling back to console logging");
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .try_init();
            return TelemetryGuard { provider: None };
        }
    };

    let provider = SdkTracerProvider::builder()
        .with_simple_exporter(exporter)
        .build();
    let tracer = provider.tracer(service_name.clone());

    let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    if Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .is_err()
    {
        // Someone else owns the global subscriber; our spans would go nowhere.
        let _ = provider.shutdown();
        return TelemetryGuard { provider: None };
    }

    tracing::info!(
        service_name = %service_name,
        endpoint = %endpoint,
        "OpenTelemetry initialized"
    );

    TelemetryGuard {
        provider: Some(provider),
    }
}
