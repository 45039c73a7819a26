//! Configuration data structures for the sentinel service.
//!
//! This module defines the schema for the application settings: the HTTP
//! server, the telemetry client, retry behaviour, the response cache and
//! logging.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Version string reported in telemetry tags and error records.
pub const API_VERSION: &str = "2.0";

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port, workers).
    #[serde(default)]
    pub server: ServerConfig,

    /// Error-tracking client settings.
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Retry policy for data fetches.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Response cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8080`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of tokio worker threads.
    /// Default: Number of logical CPU cores.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// Settings for the error-tracking client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Project DSN. Telemetry is disabled when unset.
    #[serde(default)]
    pub dsn: Option<String>,

    /// Deployment environment attached to every event.
    /// Default: `development`
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Release identifier attached to every event.
    /// Default: `sentinel@2.0`
    #[serde(default = "default_release")]
    pub release: String,

    /// Host name reported in the `server_name` tag.
    /// Default: the `HOSTNAME` environment variable, or `localhost`.
    #[serde(default = "default_server_name")]
    pub server_name: String,

    /// Forward ERROR-level log records to the telemetry client.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub capture_log_errors: bool,
}

/// Retry policy applied to data fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts, including the first.
    /// Default: `3`
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry, doubled for every later one.
    /// Default: `1000`
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
}

/// Settings for the in-memory response cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live for cached entries in seconds.
    /// Default: `300` (5 minutes)
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,

    /// Maximum number of entries kept before least-recently-used eviction.
    /// Default: `1024`
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl RetryConfig {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            environment: default_environment(),
            release: default_release(),
            server_name: default_server_name(),
            capture_log_errors: true,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_cache_ttl(),
            max_entries: default_max_entries(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Helper functions for serde defaults
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_release() -> String {
    format!("sentinel@{}", API_VERSION)
}

fn default_server_name() -> String {
    std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string())
}

fn default_true() -> bool {
    true
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_cache_ttl() -> u64 {
    300 // 5 minutes
}

fn default_max_entries() -> usize {
    1024
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
