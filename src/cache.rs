//! Response cache module
//!
//! This module provides an in-memory, time-bounded cache for the results of
//! named catalogue fetches. Entries are not evicted; a stale entry is treated
//! as absent and overwritten by the next successful computation.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Default time-to-live for cached responses (30 minutes)
pub(crate) const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

/// A cached value together with the moment it was computed
struct CacheEntry<T> {
    value: T,
    created_at: Instant,
}

/// A generic in-memory cache with a fixed time-to-live
///
/// Identical requests made within the TTL are served from memory. There is no
/// single-flight guarantee: concurrent misses for the same key each run their
/// computation, and the last one to finish wins.
pub(crate) struct ResponseCache<T> {
    /// How long a computed value stays fresh
    ttl: Duration,
    /// Cached values by key
    entries: Mutex<HashMap<String, CacheEntry<T>>>,
}

impl<T> ResponseCache<T>
where
    T: Clone,
{
    /// Creates an empty cache with the given TTL
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached value for `key`, computing and storing it on a miss
    ///
    /// A failed computation is not cached; its error is returned to the caller
    /// and the next call for the same key computes again.
    ///
    /// # Arguments
    ///
    /// * `key` - A deterministic encoding of the operation and its parameters
    /// * `compute` - Produces the value when the cache has no fresh entry
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let metas = cache
    ///     .get_or_compute("/movie/popular?page=1", || provider.fetch(&request))
    ///     .await?;
    /// ```
    pub(crate) async fn get_or_compute<F, Fut, E>(&self, key: &str, compute: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.lookup(key) {
            return Ok(value);
        }

        let value = compute().await?;

        self.lock().insert(
            key.to_string(),
            CacheEntry {
                value: value.clone(),
                created_at: Instant::now(),
            },
        );

        Ok(value)
    }

    /// Number of stored entries, stale ones included
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been cached yet
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, key: &str) -> Option<T> {
        let entries = self.lock();
        match entries.get(key) {
            Some(entry) if entry.created_at.elapsed() < self.ttl => {
                debug!(key, "cache hit");
                Some(entry.value.clone())
            }
            Some(_) => {
                debug!(key, "cache stale");
                None
            }
            None => {
                debug!(key, "cache miss");
                None
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<T>>> {
        // A panic while holding the lock cannot leave a half-written entry
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}
