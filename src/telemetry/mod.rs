//! Error-tracking client and its event pipeline.
//!
//! Events flow `TelemetryClient::capture_*` → option defaults →
//! [`EventSanitizer`] → [`Transport`]. The sanitizer redacts sensitive `extra`
//! fields and drops health-check events before anything leaves the process.
//!
//! # Submodules
//!
//! - `client`: the explicit client context object.
//! - `event`: the event record and its nested context types.
//! - `sanitizer`: the before-send filter.
//! - `transport`: delivery backends (log output, in-memory).
//! - `performance`: timed transactions around units of work.
//! - `layer`: `tracing` bridge for ERROR-level log records.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod client;
mod event;
mod layer;
mod performance;
mod sanitizer;
mod transport;

pub use client::{ClientOptions, TelemetryClient};
pub use event::{Event, ExceptionInfo, RequestInfo, UserContext};
pub use layer::TelemetryLayer;
pub use performance::{track_performance, Transaction};
pub use sanitizer::{EventSanitizer, REDACTION_MARKER, SENSITIVE_FIELDS, SUPPRESSED_PATH_SUFFIX};
pub use transport::{LogTransport, MemoryTransport, Transport};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Log target of the pipeline's own records. The log bridge never forwards it.
pub const TELEMETRY_TARGET: &str = "sentinel::telemetry";

/// Event severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warning,
    #[default]
    Error,
    Critical,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Critical => "critical",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warning,
            tracing::Level::INFO => Level::Info,
            _ => Level::Debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_serialization() {
        assert_eq!(serde_json::to_string(&Level::Warning).unwrap(), "\"warning\"");
        let level: Level = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(level, Level::Critical);
    }

    #[test]
    fn test_level_from_tracing() {
        assert_eq!(Level::from(tracing::Level::WARN), Level::Warning);
        assert_eq!(Level::from(tracing::Level::TRACE), Level::Debug);
    }
}
