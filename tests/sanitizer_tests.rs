// Event sanitizer tests
// Author: kelexine (https://github.com/kelexine)

use proptest::prelude::*;
use sentinel::telemetry::{
    Event, EventSanitizer, Level, RequestInfo, REDACTION_MARKER, SENSITIVE_FIELDS,
};
use serde_json::{json, Map, Value};

#[test]
fn test_password_redacted_other_kept() {
    let event: Event = serde_json::from_value(json!({
        "message": "login failed",
        "extra": {"password": "x", "other": "y"}
    }))
    .unwrap();

    let sanitized = EventSanitizer::new().sanitize(event).unwrap();
    assert_eq!(
        Value::Object(sanitized.extra.unwrap()),
        json!({"password": "[REDACTED]", "other": "y"})
    );
}

#[test]
fn test_health_url_suppressed() {
    let event = Event::message("probe", Level::Error)
        .with_request(RequestInfo::new("GET", "https://x/health"));
    assert!(EventSanitizer::new().sanitize(event).is_none());
}

#[test]
fn test_other_url_passes_unchanged() {
    let event = Event::message("order failed", Level::Error)
        .with_request(RequestInfo::new("POST", "https://x/orders"))
        .with_extra("order_id", 991);

    let sanitized = EventSanitizer::new().sanitize(event.clone()).unwrap();
    assert_eq!(sanitized, event);
}

#[test]
fn test_suppression_independent_of_redaction() {
    let event = Event::message("probe", Level::Error)
        .with_extra("ssn", "078-05-1120")
        .with_request(RequestInfo::new("GET", "/health"));
    assert!(EventSanitizer::new().sanitize(event).is_none());
}

#[test]
fn test_request_without_url_passes() {
    let event: Event = serde_json::from_value(json!({
        "message": "no url",
        "request": {"method": "GET"}
    }))
    .unwrap();
    assert!(EventSanitizer::new().sanitize(event).is_some());
}

#[test]
fn test_fixed_redaction_set() {
    let mut fields: Vec<_> = SENSITIVE_FIELDS.iter().copied().collect();
    fields.sort_unstable();
    assert_eq!(fields, vec!["api_key", "credit_card", "password", "ssn"]);
}

fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("password".to_string()),
        Just("credit_card".to_string()),
        Just("ssn".to_string()),
        Just("api_key".to_string()),
        "[a-z_]{1,12}",
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<String>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        Just(Value::Null),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    (
        proptest::collection::btree_map(arb_key(), arb_value(), 0..8),
        proptest::option::of(prop_oneof![
            Just("https://x/health".to_string()),
            Just("https://x/orders".to_string()),
            "/[a-z/]{0,20}",
        ]),
    )
        .prop_map(|(extra, url)| {
            let mut event = Event::message("generated", Level::Error);
            if !extra.is_empty() {
                event.extra = Some(extra.into_iter().collect::<Map<String, Value>>());
            }
            if let Some(url) = url {
                event = event.with_request(RequestInfo::new("GET", url));
            }
            event
        })
}

proptest! {
    #[test]
    fn sanitize_is_idempotent(event in arb_event()) {
        let sanitizer = EventSanitizer::new();
        let once = sanitizer.sanitize(event);
        let twice = once.clone().and_then(|e| sanitizer.sanitize(e));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn sensitive_values_never_survive(event in arb_event()) {
        let original = event.clone();
        if let Some(sanitized) = EventSanitizer::new().sanitize(event) {
            let extra = sanitized.extra.unwrap_or_default();
            for (key, value) in &extra {
                if SENSITIVE_FIELDS.contains(key.as_str()) {
                    prop_assert_eq!(value, &json!(REDACTION_MARKER));
                } else {
                    prop_assert_eq!(Some(value), original.extra.as_ref().and_then(|m| m.get(key)));
                }
            }
        }
    }

    #[test]
    fn suppressed_exactly_when_url_ends_with_health(event in arb_event()) {
        let expected = event.request_url().is_some_and(|url| url.ends_with("/health"));
        prop_assert_eq!(EventSanitizer::new().sanitize(event).is_none(), expected);
    }
}
