// Performance tracking: timed transactions around units of work
// Author: kelexine (https://github.com/kelexine)

use super::{Event, RequestInfo, TelemetryClient, UserContext};
use crate::metrics;
use std::collections::BTreeMap;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::debug;

/// A named, timed unit of work.
#[derive(Debug, Clone)]
pub struct Transaction {
    op: String,
    name: String,
    tags: BTreeMap<String, String>,
    request: Option<RequestInfo>,
    user: Option<UserContext>,
    started: Instant,
}

impl Transaction {
    pub fn new(op: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            op: op.into(),
            name: name.into(),
            tags: BTreeMap::new(),
            request: None,
            user: None,
            started: Instant::now(),
        }
    }

    pub fn with_request(mut self, request: RequestInfo) -> Self {
        self.request = Some(request);
        self
    }

    pub fn with_user(mut self, user: UserContext) -> Self {
        self.user = Some(user);
        self
    }

    pub fn set_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(key.into(), value.into());
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Error event carrying this transaction's context.
    fn error_event<E>(&self, error: &E) -> Event
    where
        E: std::error::Error + ?Sized,
    {
        let mut event = Event::from_error(error)
            .with_tag("transaction", self.name.clone())
            .with_tag("op", self.op.clone());
        for (key, value) in &self.tags {
            event.tags.insert(key.clone(), value.clone());
        }
        if let Some(request) = &self.request {
            event = event.with_request(request.clone());
        }
        if let Some(user) = &self.user {
            event = event.with_user(user.clone());
        }
        event
    }

    fn finish(&self) {
        let status = self.tags.get("status").map(String::as_str).unwrap_or("unknown");
        let elapsed = self.elapsed();
        debug!(
            op = %self.op,
            name = %self.name,
            status,
            elapsed_ms = elapsed.as_millis() as u64,
            "Transaction finished"
        );
        metrics::record_transaction(&self.op, status, elapsed.as_secs_f64());
    }
}

/// Run `fut` inside `transaction`.
///
/// Tags the transaction `status=success` or `status=error`; on error the
/// failure is captured once and returned unchanged.
pub async fn track_performance<Fut, T, E>(
    client: &TelemetryClient,
    mut transaction: Transaction,
    fut: Fut,
) -> Result<T, E>
where
    Fut: Future<Output = Result<T, E>>,
    E: std::error::Error,
{
    let result = fut.await;

    match &result {
        Ok(_) => transaction.set_tag("status", "success"),
        Err(e) => {
            transaction.set_tag("status", "error");
            client.capture_event(transaction.error_event(e));
        }
    }

    transaction.finish();
    result
}
