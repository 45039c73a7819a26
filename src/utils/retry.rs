// Retry executor with exponential backoff
// Author: kelexine (https://github.com/kelexine)

use crate::config::RetryConfig;
use crate::error::{Result, SentinelError};
use crate::metrics;
use crate::telemetry::{Level, TelemetryClient};
use backoff::{backoff::Backoff, ExponentialBackoff};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Blocks the calling thread between attempts.
pub trait Sleeper {
    fn sleep(&self, delay: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

/// Attempt bound and base delay for the retry executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Result<Self> {
        if max_attempts == 0 {
            return Err(SentinelError::Config(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if initial_delay.is_zero() {
            return Err(SentinelError::Config(
                "initial_delay must be positive".to_string(),
            ));
        }
        Ok(Self {
            max_attempts,
            initial_delay,
        })
    }

    pub fn from_config(config: &RetryConfig) -> Result<Self> {
        Self::new(config.max_attempts, config.initial_delay())
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    /// Create the backoff schedule: doubles from `initial_delay`, no jitter,
    /// no interval cap, no elapsed-time limit.
    pub fn create_backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            current_interval: self.initial_delay,
            initial_interval: self.initial_delay,
            randomization_factor: 0.0,
            multiplier: 2.0,
            max_interval: Duration::MAX,
            max_elapsed_time: None,
            ..Default::default()
        }
    }

    /// Delays between consecutive attempts: `initial_delay * 2^i` for i = 0, 1, ...
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        let mut backoff = self.create_backoff();
        std::iter::from_fn(move || backoff.next_backoff())
    }
}

/// Runs a unit of work under a [`RetryPolicy`], reporting every failed
/// attempt to the telemetry client.
#[derive(Debug, Clone)]
pub struct RetryExecutor<S = ThreadSleeper> {
    policy: RetryPolicy,
    telemetry: TelemetryClient,
    sleeper: S,
}

impl RetryExecutor<ThreadSleeper> {
    pub fn new(policy: RetryPolicy, telemetry: TelemetryClient) -> Self {
        Self {
            policy,
            telemetry,
            sleeper: ThreadSleeper,
        }
    }
}

impl<S> RetryExecutor<S> {
    /// Replace how [`RetryExecutor::execute`] waits between attempts.
    pub fn with_sleeper<S2: Sleeper>(self, sleeper: S2) -> RetryExecutor<S2> {
        RetryExecutor {
            policy: self.policy,
            telemetry: self.telemetry,
            sleeper,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Execute `operation` with async backoff, suspending the task between
    /// attempts instead of the thread.
    pub async fn execute_async<F, Fut, T, E>(
        &self,
        operation_name: &str,
        mut operation: F,
    ) -> std::result::Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: std::error::Error,
    {
        let mut delays = self.policy.delays();
        let mut attempt = 0;

        loop {
            attempt += 1;

            match operation().await {
                Ok(result) => {
                    self.record_success(operation_name, attempt);
                    return Ok(result);
                }
                Err(e) => {
                    if self.record_failure(operation_name, attempt, &e) {
                        return Err(e);
                    }
                    if let Some(delay) = delays.next() {
                        debug!(
                            "{} retrying after {}ms",
                            operation_name,
                            delay.as_millis()
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }
    }

    fn record_success(&self, operation_name: &str, attempt: u32) {
        if attempt > 1 {
            debug!("{} succeeded on attempt {}", operation_name, attempt);
        }
        metrics::record_retry_attempt(operation_name, "success");
    }

    /// Report a failed attempt. Returns `true` when no attempts remain.
    fn record_failure<E>(&self, operation_name: &str, attempt: u32, error: &E) -> bool
    where
        E: std::error::Error,
    {
        let max_attempts = self.policy.max_attempts;

        warn!(
            operation = operation_name,
            attempt,
            max_attempts,
            "Attempt failed: {}",
            error
        );
        self.telemetry.capture_message(
            format!(
                "Retry attempt {}/{} for {}",
                attempt, max_attempts, operation_name
            ),
            Level::Warning,
        );

        if attempt >= max_attempts {
            warn!(
                "{} failed after {} attempts, giving up",
                operation_name, attempt
            );
            metrics::record_retry_attempt(operation_name, "exhausted");
            self.telemetry.capture_error(error);
            true
        } else {
            metrics::record_retry_attempt(operation_name, "failure");
            false
        }
    }
}

impl<S: Sleeper> RetryExecutor<S> {
    /// Execute `operation` until it succeeds or the policy's attempts run out.
    ///
    /// The last failure is returned unchanged. Waits block the calling thread.
    pub fn execute<F, T, E>(
        &self,
        operation_name: &str,
        mut operation: F,
    ) -> std::result::Result<T, E>
    where
        F: FnMut() -> std::result::Result<T, E>,
        E: std::error::Error,
    {
        let mut delays = self.policy.delays();
        let mut attempt = 0;

        loop {
            attempt += 1;

            match operation() {
                Ok(result) => {
                    self.record_success(operation_name, attempt);
                    return Ok(result);
                }
                Err(e) => {
                    if self.record_failure(operation_name, attempt, &e) {
                        return Err(e);
                    }
                    if let Some(delay) = delays.next() {
                        debug!(
                            "{} retrying after {}ms",
                            operation_name,
                            delay.as_millis()
                        );
                        self.sleeper.sleep(delay);
                    }
                }
            }
        }
    }
}
