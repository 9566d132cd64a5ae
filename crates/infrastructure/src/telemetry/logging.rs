use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Build the event filter: `RUST_LOG` if set, otherwise the configured directive
///
/// # Errors
///
/// Returns an error if the configured directive cannot be parsed.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.filter).map_err(|e| TelemetryError::Filter(e.to_string()))
}

/// Initialize logging
///
/// # Errors
///
/// Returns an error if the filter is invalid or a global subscriber is
/// already installed.
///
/// # Example
///
/// ```rust,ignore
/// use infrastructure::{config::LoggingConfig, telemetry::init_logging};
///
/// init_logging(&LoggingConfig::default()).expect("Failed to initialize logging");
/// ```
pub fn init_logging(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let env_filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if config.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    result.map_err(|e| TelemetryError::Init(e.to_string()))?;

    info!(json = config.json, "Logging initialized");
    Ok(())
}

/// Error type for logging initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),

    /// The filter directive is malformed
    #[error("Invalid log filter: {0}")]
    Filter(String),
}
