// Error record store
// Author: kelexine (https://github.com/kelexine)
//
// Real persistence is out of scope; MockErrorStore answers with a fixed
// sample record so the request path can be exercised end to end.

use crate::config::API_VERSION;
use crate::error::Result;
use crate::models::{ErrorRecord, User};
use crate::telemetry::Level;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::debug;

/// Source of recent error records.
pub trait ErrorStore: Send + Sync {
    /// Records belonging to `user` newer than `since`.
    fn fetch_recent(&self, user: &User, since: DateTime<Utc>) -> Result<Vec<ErrorRecord>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MockErrorStore;

impl MockErrorStore {
    pub fn new() -> Self {
        Self
    }

    fn sample_record(user: &User) -> ErrorRecord {
        ErrorRecord {
            event_id: "abc123".to_string(),
            timestamp: Utc::now(),
            level: Level::Error,
            message: "Sample error for testing".to_string(),
            tags: BTreeMap::from([
                ("component".to_string(), "api".to_string()),
                ("version".to_string(), API_VERSION.to_string()),
            ]),
            user: Some(user.into()),
            extra: None,
        }
    }
}

impl ErrorStore for MockErrorStore {
    fn fetch_recent(&self, user: &User, since: DateTime<Utc>) -> Result<Vec<ErrorRecord>> {
        debug!("Fetching errors for user {} since {}", user.id, since.to_rfc3339());

        let records = vec![Self::sample_record(user)]
            .into_iter()
            .filter(|record| record.timestamp >= since)
            .collect();
        Ok(records)
    }
}
