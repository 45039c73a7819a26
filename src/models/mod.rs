//! Data models for the error-tracking API.
//!
//! - `records`: stored error records, API callers, and response bodies.

// Author: kelexine (https://github.com/kelexine)

pub mod records;

pub use records::{ErrorRecord, RecentErrorsResponse, User};
