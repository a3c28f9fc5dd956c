use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use bytes::Bytes;

use crate::ports::cache::WeatherCache;

struct CacheEntry {
    payload: Bytes,
    expires_at: Instant,
}

/// In-process cache with a single TTL for every entry.
///
/// Expired entries are never purged; they are only treated as absent on read,
/// so the map grows with the number of distinct keys ever stored.
pub struct MemoryCache {
    inner: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Lookup as of `now`. An entry is still live at exactly its expiry instant.
    pub fn get_at(&self, key: &str, now: Instant) -> Option<Bytes> {
        let cache = self.inner.read().map_or_else(
            |_| {
                tracing::error!("Cache lock poisoned on get('{key}'), returning miss");
                None
            },
            Some,
        )?;
        let entry = cache.get(key)?;
        if now > entry.expires_at {
            return None;
        }
        Some(entry.payload.clone())
    }

    /// Store `payload` as if inserted at `now`, replacing any previous entry.
    pub fn set_at(&self, key: &str, payload: Bytes, now: Instant) {
        let Some(expires_at) = now.checked_add(self.ttl) else {
            tracing::error!(
                ttl_secs = self.ttl.as_secs(),
                "Cache TTL overflows the clock on set('{key}'), skipping write"
            );
            return;
        };
        if let Ok(mut cache) = self.inner.write() {
            cache.insert(
                key.to_string(),
                CacheEntry {
                    payload,
                    expires_at,
                },
            );
        } else {
            tracing::error!("Cache lock poisoned on set('{key}'), skipping write");
        }
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.inner.read().map_or(0, |cache| cache.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WeatherCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Bytes> {
        self.get_at(key, Instant::now())
    }

    fn set(&self, key: &str, payload: Bytes) {
        self.set_at(key, payload, Instant::now());
    }
}
