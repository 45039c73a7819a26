// Response cache - key/value storage with per-entry TTL
// Author: kelexine (https://github.com/kelexine)

use crate::cache::models::{CacheEntry, CacheStats};
use crate::config::CacheConfig;
use crate::metrics;
use lru::LruCache;
use parking_lot::Mutex;
use serde_json::Value;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tracing::debug;

/// Key/value cache used by request handlers.
pub trait Cache: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value, ttl: Duration);
}

/// In-process cache with LRU eviction and per-entry expiry.
pub struct MemoryCache {
    entries: Mutex<LruCache<String, CacheEntry>>,
    stats: Mutex<CacheStats>,
}

impl MemoryCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            stats: Mutex::new(CacheStats::default()),
        }
    }

    /// Create a cache sized from configuration; a zero capacity becomes 1.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(NonZeroUsize::new(config.max_entries).unwrap_or(NonZeroUsize::MIN))
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.lock().clone();
        stats.entries = self.entries.lock().len();
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Clear all cached entries
    pub fn clear(&self) {
        self.entries.lock().clear();
        metrics::update_cache_entries(0);
        debug!("Cache cleared");
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<Value> {
        let mut entries = self.entries.lock();

        let hit = match entries.peek(key).map(|entry| entry.is_expired(now)) {
            // get() also promotes the entry in the LRU order
            Some(false) => entries.get(key).map(|entry| entry.value.clone()),
            Some(true) => {
                entries.pop(key);
                metrics::record_cache_expired();
                metrics::update_cache_entries(entries.len());
                debug!("Cache entry expired: {}", key);
                None
            }
            None => None,
        };
        drop(entries);

        let mut stats = self.stats.lock();
        if hit.is_some() {
            stats.hits += 1;
            metrics::record_cache_hit();
        } else {
            stats.misses += 1;
            metrics::record_cache_miss();
        }
        hit
    }

    fn set_at(&self, key: &str, value: Value, ttl: Duration, now: Instant) {
        let entry = CacheEntry {
            value,
            expires_at: now + ttl,
        };

        let mut entries = self.entries.lock();
        entries.put(key.to_string(), entry);
        metrics::update_cache_entries(entries.len());
        drop(entries);

        self.stats.lock().sets += 1;
        metrics::record_cache_set();
        debug!("Cached {} for {}s", key, ttl.as_secs());
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Option<Value> {
        self.get_at(key, Instant::now())
    }

    fn set(&self, key: &str, value: Value, ttl: Duration) {
        self.set_at(key, value, ttl, Instant::now());
    }
}
