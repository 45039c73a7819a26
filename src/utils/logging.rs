//! Structured logging initialization.
//!
//! This module configures the `tracing` ecosystem for the application and,
//! when a telemetry client is supplied, attaches the bridge layer that turns
//! ERROR-level log records into telemetry events.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::{Result, SentinelError};
use crate::telemetry::TelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `compact`: Single-line human-readable output.
/// - `pretty` (default): Multi-line, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig, telemetry: Option<TelemetryLayer>) -> Result<()> {
    // Configure filter from environment or config file
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| SentinelError::Config(format!("Invalid log level {}: {}", config.level, e)))?;

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(telemetry);

    let initialized = match config.format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        "compact" => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
    };

    initialized.map_err(|e| SentinelError::Internal(format!("Failed to initialize logging: {}", e)))
}
