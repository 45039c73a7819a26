// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{
    health_handler, ingest_event_handler, metrics_handler, recent_errors_handler,
};
use super::middleware::{request_id_layers, track_requests};
use crate::cache::MemoryCache;
use crate::config::AppConfig;
use crate::error::Result;
use crate::store::ErrorStore;
use crate::telemetry::TelemetryClient;
use crate::utils::{RetryExecutor, RetryPolicy};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::{DefaultOnFailure, TraceLayer};
use tracing::Level;

/// Maximum accepted request body (raw events).
const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub telemetry: TelemetryClient,
    pub retry: Arc<RetryExecutor>,
    pub cache: Arc<MemoryCache>,
    pub store: Arc<dyn ErrorStore>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        telemetry: TelemetryClient,
        store: Arc<dyn ErrorStore>,
    ) -> Result<Self> {
        let policy = RetryPolicy::from_config(&config.retry)?;
        let cache = MemoryCache::from_config(&config.cache);

        Ok(Self {
            retry: Arc::new(RetryExecutor::new(policy, telemetry.clone())),
            cache: Arc::new(cache),
            config: Arc::new(config),
            telemetry,
            store,
        })
    }
}

pub fn create_router(state: AppState) -> Router {
    let (set_request_id, propagate_request_id) = request_id_layers();

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/errors", get(recent_errors_handler))
        .route("/api/events", post(ingest_event_handler))
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_requests))
        .layer(tower_http::limit::RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        // 5xx responses are already captured by the handler
        .layer(TraceLayer::new_for_http().on_failure(DefaultOnFailure::new().level(Level::WARN)))
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state)
}
