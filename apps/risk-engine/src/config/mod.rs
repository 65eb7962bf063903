//! Configuration module for the risk engine.
//!
//! Loads risk thresholds, suggestion rules and observability settings from
//! YAML, with `${VAR}` / `${VAR:-default}` environment interpolation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use risk_engine::config::load_config;
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! let engine = config.risk.engine();
//! let generator = config.suggestions.generator();
//! ```

mod observability;
mod risk;
mod suggestions;

pub use observability::ObservabilityConfig;
pub use risk::RiskConfig;
pub use suggestions::SuggestionConfig;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        /// Path that failed to read.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML.
    #[error("failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Risk tiering and max-loss settings.
    #[serde(default)]
    pub risk: RiskConfig,
    /// Suggestion rule settings.
    #[serde(default)]
    pub suggestions: SuggestionConfig,
    /// Logging and metrics settings.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Load configuration from a YAML file.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    let config = load_config_from_string(&contents)?;
    tracing::debug!(path = %path, "Configuration loaded");
    Ok(config)
}

/// Load configuration from a YAML string.
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax. Unset or empty
/// variables without a default become the empty string.
#[allow(clippy::expect_used)] // Regex is compile-time constant
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let risk = &config.risk;
    for (name, value) in [
        ("red_leverage", risk.red_leverage),
        ("yellow_leverage", risk.yellow_leverage),
        ("red_concentration", risk.red_concentration),
        ("yellow_concentration", risk.yellow_concentration),
        ("red_liquidity", risk.red_liquidity),
        ("yellow_liquidity", risk.yellow_liquidity),
    ] {
        if value < Decimal::ZERO {
            return Err(ConfigError::ValidationError(format!(
                "risk.{name} cannot be negative, got {value}"
            )));
        }
    }

    if risk.yellow_leverage >= risk.red_leverage {
        return Err(ConfigError::ValidationError(format!(
            "risk.yellow_leverage ({}) must be below risk.red_leverage ({})",
            risk.yellow_leverage, risk.red_leverage
        )));
    }
    if risk.yellow_concentration >= risk.red_concentration {
        return Err(ConfigError::ValidationError(format!(
            "risk.yellow_concentration ({}) must be below risk.red_concentration ({})",
            risk.yellow_concentration, risk.red_concentration
        )));
    }
    // Liquidity tiers run the other way: less liquidity is worse.
    if risk.yellow_liquidity <= risk.red_liquidity {
        return Err(ConfigError::ValidationError(format!(
            "risk.yellow_liquidity ({}) must be above risk.red_liquidity ({})",
            risk.yellow_liquidity, risk.red_liquidity
        )));
    }
    if risk.short_call_multiplier <= Decimal::ZERO {
        return Err(ConfigError::ValidationError(format!(
            "risk.short_call_multiplier must be positive, got {}",
            risk.short_call_multiplier
        )));
    }

    let rules = &config.suggestions;
    if rules.concentration_limit <= Decimal::ZERO {
        return Err(ConfigError::ValidationError(
            "suggestions.concentration_limit must be positive".to_string(),
        ));
    }
    if let Some(high) = rules.concentration_high_limit
        && high < rules.concentration_limit
    {
        return Err(ConfigError::ValidationError(format!(
            "suggestions.concentration_high_limit ({high}) cannot be below suggestions.concentration_limit ({})",
            rules.concentration_limit
        )));
    }
    if rules.liquidity_critical > rules.liquidity_target {
        return Err(ConfigError::ValidationError(format!(
            "suggestions.liquidity_critical ({}) cannot exceed suggestions.liquidity_target ({})",
            rules.liquidity_critical, rules.liquidity_target
        )));
    }
    if rules.expiration_urgent_days < 0
        || rules.expiration_urgent_days >= rules.rollover_window_days
    {
        return Err(ConfigError::ValidationError(format!(
            "suggestions.expiration_urgent_days ({}) must be in [0, rollover_window_days ({}))",
            rules.expiration_urgent_days, rules.rollover_window_days
        )));
    }

    config.observability.metrics_config()?;

    Ok(())
}
