// Event transports
// Author: kelexine (https://github.com/kelexine)

use super::{Event, TELEMETRY_TARGET};
use crate::error::Result;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

/// Delivers sanitized events. Delivery semantics belong to the implementation.
pub trait Transport: Send + Sync {
    fn send(&self, event: &Event) -> Result<()>;
}

/// Writes each event as a JSON log record under the `sentinel::telemetry` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTransport;

impl Transport for LogTransport {
    fn send(&self, event: &Event) -> Result<()> {
        let payload = serde_json::to_string(event)?;
        info!(
            target: TELEMETRY_TARGET,
            event_id = %event.event_id,
            level = %event.level,
            "{}",
            payload
        );
        Ok(())
    }
}

/// Keeps delivered events in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryTransport {
    events: Arc<Mutex<Vec<Event>>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything sent so far.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Transport for MemoryTransport {
    fn send(&self, event: &Event) -> Result<()> {
        self.events.lock().push(event.clone());
        Ok(())
    }
}
