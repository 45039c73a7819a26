//! Axum-based HTTP server for the sentinel service.
//!
//! Exposes the error-tracking view and its support endpoints. Every request
//! handler reports through the `TelemetryClient` held in `AppState`.
//!
//! # Components
//!
//! - `handlers`: Endpoint implementations (errors, events, health, metrics).
//! - `extract`: Request extractors (calling user).
//! - `middleware`: Request ID and request metrics middleware.
//! - `routes`: Application state and router configuration.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod extract;
mod handlers;
mod middleware;
mod routes;

pub use extract::{CurrentUser, USER_EMAIL_HEADER, USER_ID_HEADER};
pub use handlers::HealthResponse;
pub use routes::{create_router, AppState};
