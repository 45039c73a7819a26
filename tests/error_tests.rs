// Error handling tests
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::IntoResponse;
use sentinel::error::SentinelError;

#[test]
fn test_error_display_messages() {
    let errors = vec![
        SentinelError::Config("bad value".to_string()),
        SentinelError::InvalidRequest("Bad request".to_string()),
        SentinelError::Unauthorized("missing header".to_string()),
        SentinelError::Store("timeout".to_string()),
        SentinelError::Internal("oops".to_string()),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty(), "Error should have display message");
    }
}

#[test]
fn test_store_error() {
    let error = SentinelError::Store("Connection refused".to_string());
    assert!(format!("{}", error).contains("Connection refused"));
    assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error.error_type(), "store_error");
}

#[test]
fn test_unauthorized_error() {
    let error = SentinelError::Unauthorized("missing x-user-id header".to_string());
    assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(error.into_response().status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn test_invalid_request_error() {
    let error = SentinelError::InvalidRequest("Missing message field".to_string());
    assert!(format!("{}", error).contains("Missing message field"));
    assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_json_error_is_bad_request() {
    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let error = SentinelError::from(json_err);
    assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(error.error_type(), "invalid_request_error");
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml");
    let error: SentinelError = io.into();
    assert!(format!("{}", error).contains("config.toml"));
    assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}
