// Before-send filter: sensitive field redaction and health-check suppression
// Author: kelexine (https://github.com/kelexine)

use super::Event;
use phf::phf_set;
use serde_json::Value;
use tracing::debug;

/// Placeholder written over sensitive values.
pub const REDACTION_MARKER: &str = "[REDACTED]";

/// Events from requests whose URL ends with this suffix are never sent.
pub const SUPPRESSED_PATH_SUFFIX: &str = "/health";

/// Keys in `extra` whose values are replaced before sending.
pub static SENSITIVE_FIELDS: phf::Set<&'static str> = phf_set! {
    "password",
    "credit_card",
    "ssn",
    "api_key",
};

/// Filters events before they reach the transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventSanitizer;

impl EventSanitizer {
    pub fn new() -> Self {
        Self
    }

    /// Redact sensitive `extra` values and drop health-check events.
    ///
    /// Returns `None` when the event must not be transmitted.
    pub fn sanitize(&self, mut event: Event) -> Option<Event> {
        self.redact(&mut event);

        if Self::is_suppressed(&event) {
            debug!(event_id = %event.event_id, "Dropping health check event");
            return None;
        }

        Some(event)
    }

    /// Replace the values of sensitive keys present in `extra`, in place.
    ///
    /// Returns the number of fields redacted.
    pub fn redact(&self, event: &mut Event) -> usize {
        let Some(extra) = event.extra.as_mut() else {
            return 0;
        };

        let mut redacted = 0;
        for field in SENSITIVE_FIELDS.iter() {
            if let Some(value) = extra.get_mut(*field) {
                *value = Value::String(REDACTION_MARKER.to_string());
                redacted += 1;
            }
        }
        redacted
    }

    /// Missing request or URL means the event is kept.
    pub fn is_suppressed(event: &Event) -> bool {
        event
            .request_url()
            .is_some_and(|url| url.ends_with(SUPPRESSED_PATH_SUFFIX))
    }
}
