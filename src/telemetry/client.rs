//! The error-tracking client.
//!
//! `TelemetryClient` is the explicit context object constructed once at
//! process start. It owns the client options, the before-send sanitizer and
//! the transport, and is cloned into whichever component needs to report.
//! Nothing here is process-global: two clients never share state.

// Author: kelexine (https://github.com/kelexine)

use super::{Event, EventSanitizer, Level, Transaction, Transport, TELEMETRY_TARGET};
use crate::config::{TelemetryConfig, API_VERSION};
use crate::metrics;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Options applied to every event the client sends.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Project DSN. `None` disables the client.
    pub dsn: Option<String>,
    pub environment: Option<String>,
    pub release: Option<String>,
    /// Tags merged into every event; event tags take precedence.
    pub tags: BTreeMap<String, String>,
}

impl ClientOptions {
    /// Build options from configuration, including the `api_version` and
    /// `server_name` tags.
    pub fn from_config(config: &TelemetryConfig) -> Self {
        let mut tags = BTreeMap::new();
        tags.insert("api_version".to_string(), API_VERSION.to_string());
        tags.insert("server_name".to_string(), config.server_name.clone());

        Self {
            dsn: config.dsn.clone().filter(|dsn| !dsn.trim().is_empty()),
            environment: Some(config.environment.clone()),
            release: Some(config.release.clone()),
            tags,
        }
    }
}

/// Cheaply cloneable handle to the telemetry pipeline.
#[derive(Clone)]
pub struct TelemetryClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    options: ClientOptions,
    sanitizer: EventSanitizer,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for TelemetryClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelemetryClient")
            .field("enabled", &self.is_enabled())
            .field("environment", &self.inner.options.environment)
            .field("release", &self.inner.options.release)
            .finish()
    }
}

impl TelemetryClient {
    pub fn new<T>(options: ClientOptions, transport: T) -> Self
    where
        T: Transport + 'static,
    {
        Self::with_transport(options, Arc::new(transport))
    }

    pub fn with_transport(options: ClientOptions, transport: Arc<dyn Transport>) -> Self {
        if options.dsn.is_none() {
            debug!("No DSN configured, telemetry client disabled");
        }

        Self {
            inner: Arc::new(ClientInner {
                options,
                sanitizer: EventSanitizer::new(),
                transport,
            }),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.options.dsn.is_some()
    }

    pub fn options(&self) -> &ClientOptions {
        &self.inner.options
    }

    /// Apply client options and the before-send filter, then hand the event
    /// to the transport.
    ///
    /// Returns the event id when the event was delivered.
    pub fn capture_event(&self, mut event: Event) -> Option<Uuid> {
        if !self.is_enabled() {
            return None;
        }

        let options = &self.inner.options;
        if event.environment.is_none() {
            event.environment = options.environment.clone();
        }
        if event.release.is_none() {
            event.release = options.release.clone();
        }
        for (key, value) in &options.tags {
            event
                .tags
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }

        let level = event.level;
        let Some(event) = self.inner.sanitizer.sanitize(event) else {
            metrics::record_event(level, "dropped");
            return None;
        };

        match self.inner.transport.send(&event) {
            Ok(()) => {
                metrics::record_event(level, "sent");
                Some(event.event_id)
            }
            Err(e) => {
                warn!(
                    target: TELEMETRY_TARGET,
                    event_id = %event.event_id,
                    "Failed to send event: {}",
                    e
                );
                metrics::record_event(level, "failed");
                None
            }
        }
    }

    pub fn capture_message(&self, message: impl Into<String>, level: Level) -> Option<Uuid> {
        self.capture_event(Event::message(message, level))
    }

    pub fn capture_error<E>(&self, error: &E) -> Option<Uuid>
    where
        E: std::error::Error + ?Sized,
    {
        self.capture_event(Event::from_error(error))
    }

    /// Capture a message with additional `extra` context.
    pub fn capture_custom_error(
        &self,
        message: impl Into<String>,
        level: Level,
        extra: Map<String, Value>,
    ) -> Option<Uuid> {
        let message = message.into();
        let mut event = Event::message(message.clone(), level);
        if !extra.is_empty() {
            event.extra = Some(extra);
        }

        let event_id = self.capture_event(event);
        match event_id {
            Some(id) => debug!("Captured event {}: {}", id, message),
            None => debug!("Event not sent: {}", message),
        }
        event_id
    }

    pub fn start_transaction(&self, op: impl Into<String>, name: impl Into<String>) -> Transaction {
        Transaction::new(op, name)
    }
}
