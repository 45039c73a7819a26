// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics,
    CACHE_ENTRIES,
    CACHE_OPERATIONS,
    REQUESTS_TOTAL,
    REQUEST_DURATION,
    RETRY_ATTEMPTS,
    TELEMETRY_EVENTS,
    TRANSACTION_DURATION,
};

use crate::telemetry::Level;

/// Helper to record request metrics
pub fn record_request(method: &str, endpoint: &str, status_code: u16, duration_secs: f64) {
    let status = status_code.to_string();
    REQUESTS_TOTAL
        .with_label_values(&[method, endpoint, &status])
        .inc();

    REQUEST_DURATION
        .with_label_values(&[method, endpoint, &status])
        .observe(duration_secs);
}

/// Helper to record telemetry event outcomes
pub fn record_event(level: Level, outcome: &str) {
    TELEMETRY_EVENTS
        .with_label_values(&[level.as_str(), outcome])
        .inc();
}

pub fn record_transaction(op: &str, status: &str, duration_secs: f64) {
    TRANSACTION_DURATION
        .with_label_values(&[op, status])
        .observe(duration_secs);
}

/// Helper to record retry executor attempts
pub fn record_retry_attempt(operation: &str, outcome: &str) {
    RETRY_ATTEMPTS.with_label_values(&[operation, outcome]).inc();
}

/// Helpers to record response cache operations
pub fn record_cache_hit() {
    CACHE_OPERATIONS.with_label_values(&["hit"]).inc();
}

pub fn record_cache_miss() {
    CACHE_OPERATIONS.with_label_values(&["miss"]).inc();
}

pub fn record_cache_set() {
    CACHE_OPERATIONS.with_label_values(&["set"]).inc();
}

pub fn record_cache_expired() {
    CACHE_OPERATIONS.with_label_values(&["expired"]).inc();
}

pub fn update_cache_entries(count: usize) {
    CACHE_ENTRIES.with_label_values(&["active"]).set(count as f64);
}
