// Retry executor tests
// Author: kelexine (https://github.com/kelexine)

use parking_lot::Mutex;
use sentinel::error::SentinelError;
use sentinel::telemetry::{ClientOptions, Level, MemoryTransport, TelemetryClient};
use sentinel::utils::{RetryExecutor, RetryPolicy, Sleeper};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Default)]
struct RecordingSleeper(Arc<Mutex<Vec<Duration>>>);

impl Sleeper for RecordingSleeper {
    fn sleep(&self, delay: Duration) {
        self.0.lock().push(delay);
    }
}

impl RecordingSleeper {
    fn delays(&self) -> Vec<Duration> {
        self.0.lock().clone()
    }
}

fn telemetry() -> (TelemetryClient, MemoryTransport) {
    let transport = MemoryTransport::new();
    let options = ClientOptions {
        dsn: Some("https://key@errors.example.com/1".to_string()),
        ..ClientOptions::default()
    };
    (TelemetryClient::new(options, transport.clone()), transport)
}

fn executor(
    max_attempts: u32,
    initial_delay: Duration,
) -> (RetryExecutor<RecordingSleeper>, RecordingSleeper, MemoryTransport) {
    let (client, transport) = telemetry();
    let sleeper = RecordingSleeper::default();
    let policy = RetryPolicy::new(max_attempts, initial_delay).unwrap();
    let executor = RetryExecutor::new(policy, client).with_sleeper(sleeper.clone());
    (executor, sleeper, transport)
}

#[test]
fn test_always_failing_invoked_max_attempts_times() {
    for max_attempts in 1..=5 {
        let (executor, sleeper, transport) = executor(max_attempts, Duration::from_millis(10));
        let mut calls = 0;

        let result: Result<(), SentinelError> = executor.execute("always_fails", || {
            calls += 1;
            Err(SentinelError::Store(format!("failure {}", calls)))
        });

        assert_eq!(calls, max_attempts);
        match result {
            Err(SentinelError::Store(message)) => {
                assert_eq!(message, format!("failure {}", max_attempts));
            }
            other => panic!("expected the last failure, got {:?}", other),
        }
        assert_eq!(sleeper.delays().len() as u32, max_attempts - 1);

        // One warning per attempt plus the terminal error
        let events = transport.events();
        assert_eq!(events.len() as u32, max_attempts + 1);
        let warnings = events.iter().filter(|e| e.level == Level::Warning).count();
        assert_eq!(warnings as u32, max_attempts);
        assert_eq!(events.last().unwrap().level, Level::Error);
    }
}

#[test]
fn test_succeeds_on_attempt_k() {
    let max_attempts = 5;
    for k in 1..=max_attempts {
        let (executor, sleeper, transport) = executor(max_attempts, Duration::from_millis(10));
        let mut calls = 0;

        let result: Result<String, SentinelError> = executor.execute("eventually_ok", || {
            calls += 1;
            if calls < k {
                Err(SentinelError::Store("not yet".to_string()))
            } else {
                Ok(format!("value from attempt {}", calls))
            }
        });

        assert_eq!(calls, k);
        assert_eq!(result.unwrap(), format!("value from attempt {}", k));
        assert_eq!(sleeper.delays().len() as u32, k - 1);
        assert!(transport.events().iter().all(|e| e.level == Level::Warning));
        assert_eq!(transport.len() as u32, k - 1);
    }
}

#[test]
fn test_backoff_delays_double() {
    let (executor, sleeper, _transport) = executor(4, Duration::from_secs(1));

    let _: Result<(), SentinelError> =
        executor.execute("doubling", || Err(SentinelError::Store("down".to_string())));

    assert_eq!(
        sleeper.delays(),
        vec![
            Duration::from_secs(1),
            Duration::from_secs(2),
            Duration::from_secs(4),
        ]
    );
}

#[test]
fn test_warning_messages_name_attempt_and_bound() {
    let (executor, _sleeper, transport) = executor(3, Duration::from_millis(1));

    let _: Result<(), SentinelError> =
        executor.execute("fetch_recent_errors", || Err(SentinelError::Store("down".to_string())));

    let messages: Vec<_> = transport
        .events()
        .into_iter()
        .filter(|e| e.level == Level::Warning)
        .filter_map(|e| e.message)
        .collect();
    assert_eq!(
        messages,
        vec![
            "Retry attempt 1/3 for fetch_recent_errors",
            "Retry attempt 2/3 for fetch_recent_errors",
            "Retry attempt 3/3 for fetch_recent_errors",
        ]
    );
}

#[test]
fn test_terminal_event_carries_failure() {
    let (executor, _sleeper, transport) = executor(2, Duration::from_millis(1));

    let _: Result<(), SentinelError> =
        executor.execute("db", || Err(SentinelError::Store("connection refused".to_string())));

    let events = transport.events();
    let terminal = events.last().unwrap();
    let exception = terminal.exception.as_ref().unwrap();
    assert_eq!(terminal.level, Level::Error);
    assert!(exception.value.contains("connection refused"));
    assert!(exception.type_name.contains("SentinelError"));
}

#[tokio::test(start_paused = true)]
async fn test_async_backoff_suspends_task() {
    let (client, transport) = telemetry();
    let policy = RetryPolicy::new(3, Duration::from_secs(1)).unwrap();
    let executor = RetryExecutor::new(policy, client);

    let start = tokio::time::Instant::now();
    let mut calls = 0;
    let result: Result<u32, SentinelError> = executor
        .execute_async("async_fetch", || {
            calls += 1;
            let outcome = if calls < 3 {
                Err(SentinelError::Store("busy".to_string()))
            } else {
                Ok(calls)
            };
            async move { outcome }
        })
        .await;

    assert_eq!(result.unwrap(), 3);
    // 1s before the second attempt, 2s before the third
    assert_eq!(start.elapsed(), Duration::from_secs(3));
    assert_eq!(transport.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_async_exhaustion_returns_last_failure() {
    let (client, transport) = telemetry();
    let policy = RetryPolicy::new(2, Duration::from_millis(250)).unwrap();
    let executor = RetryExecutor::new(policy, client);

    let result: Result<(), SentinelError> = executor
        .execute_async("async_fail", || async {
            Err(SentinelError::Store("gone".to_string()))
        })
        .await;

    assert!(matches!(result, Err(SentinelError::Store(ref m)) if m == "gone"));
    assert_eq!(transport.len(), 3);
}

#[test]
fn test_disabled_telemetry_still_retries() {
    let transport = MemoryTransport::new();
    let client = TelemetryClient::new(ClientOptions::default(), transport.clone());
    let sleeper = RecordingSleeper::default();
    let policy = RetryPolicy::new(3, Duration::from_millis(5)).unwrap();
    let executor = RetryExecutor::new(policy, client).with_sleeper(sleeper.clone());
    let mut calls = 0;

    let _: Result<(), SentinelError> = executor.execute("quiet", || {
        calls += 1;
        Err(SentinelError::Store("down".to_string()))
    });

    assert_eq!(calls, 3);
    assert!(transport.is_empty());
}
