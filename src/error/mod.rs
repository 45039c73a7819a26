// Error types for the sentinel service
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SentinelError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Error store unavailable: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SentinelError {
    /// Error type string used in JSON error bodies.
    pub fn error_type(&self) -> &'static str {
        match self {
            SentinelError::Unauthorized(_) => "authentication_error",
            SentinelError::InvalidRequest(_) | SentinelError::Json(_) => "invalid_request_error",
            SentinelError::Config(_) | SentinelError::ConfigParsing(_) => "configuration_error",
            SentinelError::Store(_) => "store_error",
            SentinelError::Io(_) | SentinelError::Internal(_) => "api_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            SentinelError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            SentinelError::InvalidRequest(_) | SentinelError::Json(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Convert SentinelError to HTTP responses for Axum
impl IntoResponse for SentinelError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({
            "type": "error",
            "error": {
                "type": self.error_type(),
                "message": self.to_string(),
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, SentinelError>;
