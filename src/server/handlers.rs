// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::extract::CurrentUser;
use super::routes::AppState;
use crate::cache::{Cache, CacheStats};
use crate::error::{Result, SentinelError};
use crate::metrics;
use crate::models::{ErrorRecord, RecentErrorsResponse, User};
use crate::telemetry::{track_performance, Event, RequestInfo, UserContext};
use axum::{
    extract::{OriginalUri, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};

/// How far back `GET /api/errors` looks.
const RECENT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub telemetry_enabled: bool,
    pub environment: String,
    pub cache: CacheStats,
    pub timestamp: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        telemetry_enabled: state.telemetry.is_enabled(),
        environment: state.config.telemetry.environment.clone(),
        cache: state.cache.stats(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Handler for `GET /api/errors`: recent errors for the calling user.
pub async fn recent_errors_handler(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    CurrentUser(user): CurrentUser,
) -> Response {
    let transaction = state
        .telemetry
        .start_transaction("api.error_tracking", "recent_errors")
        .with_request(RequestInfo::new("GET", uri.to_string()))
        .with_user(UserContext::from(&user));

    let result = track_performance(
        &state.telemetry,
        transaction,
        load_recent_errors(&state, &user),
    )
    .await;

    match result {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            warn!("Failed to load recent errors for user {}: {}", user.id, e);
            e.into_response()
        }
    }
}

/// Serve from cache when possible, otherwise fetch through the retry executor
/// and cache the result.
async fn load_recent_errors(state: &AppState, user: &User) -> Result<RecentErrorsResponse> {
    let cache_key = format!("errors:recent:{}", user.id);

    if let Some(cached) = state.cache.get(&cache_key) {
        match serde_json::from_value::<Vec<ErrorRecord>>(cached) {
            Ok(errors) if !errors.is_empty() => {
                return Ok(RecentErrorsResponse {
                    errors,
                    cached: true,
                    count: None,
                });
            }
            // An empty cached list is treated as a miss
            Ok(_) => debug!("Cached list for {} is empty, refetching", cache_key),
            Err(e) => warn!("Discarding unreadable cache entry {}: {}", cache_key, e),
        }
    }

    let since = Utc::now() - chrono::Duration::days(RECENT_WINDOW_DAYS);
    let errors = state
        .retry
        .execute_async("fetch_recent_errors", || {
            std::future::ready(state.store.fetch_recent(user, since))
        })
        .await?;

    state.cache.set(
        &cache_key,
        serde_json::to_value(&errors)?,
        state.config.cache.ttl(),
    );

    let count = errors.len();
    Ok(RecentErrorsResponse {
        errors,
        cached: false,
        count: Some(count),
    })
}

/// Handler for `POST /api/events`: accept a raw event from a client SDK.
///
/// The event goes through the same before-send filter as server-side events;
/// `id` is null when it was dropped or telemetry is disabled.
pub async fn ingest_event_handler(
    State(state): State<AppState>,
    Json(event): Json<Event>,
) -> Result<impl IntoResponse> {
    if event.message.is_none() && event.exception.is_none() {
        return Err(SentinelError::InvalidRequest(
            "event needs a message or an exception".to_string(),
        ));
    }

    let event_id = state.telemetry.capture_event(event);
    match event_id {
        Some(id) => info!("Accepted client event {}", id),
        None => debug!("Client event not forwarded"),
    }

    Ok((StatusCode::ACCEPTED, Json(json!({ "id": event_id }))))
}

/// Handler for `GET /metrics` in Prometheus text format.
pub async fn metrics_handler() -> Result<Response> {
    let body = metrics::gather_metrics()?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response())
}
