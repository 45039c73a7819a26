//! Cache entry and statistics models.

// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// A cached value with its expiry deadline.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: Value,
    pub expires_at: Instant,
}

impl CacheEntry {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Statistics for cache operations.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of lookups answered from the cache.
    pub hits: u64,
    /// Number of lookups that found nothing, or only an expired entry.
    pub misses: u64,
    /// Number of values stored.
    pub sets: u64,
    /// Number of live entries at the time of the snapshot.
    pub entries: usize,
}
