// Error record models returned by the error-tracking API
// Author: kelexine (https://github.com/kelexine)

use crate::telemetry::{Level, UserContext};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// An authenticated API caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id: id.into(),
            email,
        }
    }
}

impl From<&User> for UserContext {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
        }
    }
}

/// A stored error occurrence as served by `GET /api/errors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub event_id: String,
    /// Serialized as RFC 3339.
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub message: String,
    pub tags: BTreeMap<String, String>,
    pub user: Option<UserContext>,
    pub extra: Option<Map<String, Value>>,
}

/// Body of `GET /api/errors`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentErrorsResponse {
    pub errors: Vec<ErrorRecord>,
    pub cached: bool,
    /// Only present on freshly fetched results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}
