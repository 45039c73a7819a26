//! Utility functions and helpers for the sentinel service.
//!
//! This module provides cross-cutting concerns like structured logging
//! and the retry executor.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization with the telemetry bridge.
//! - `retry`: Retry with exponential backoff and per-attempt reporting.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
pub mod retry;

pub use retry::{RetryExecutor, RetryPolicy, Sleeper, ThreadSleeper};
