//! Read-through cache for slow-changing lookups such as category codes.
//!
//! The service is handed to its consumers explicitly; there is no process
//! global. Entries become stale after [`CachePolicy::stale_after`] and are
//! purged once they are older than [`CachePolicy::gc_after`].

use std::future::Future;
use std::sync::Arc;

use chrono::TimeDelta;
use mockable::Clock;
use serde_json::Value;
use tracing::warn;

use crate::domain::Error;
use crate::domain::ports::{CachedEntry, QueryCache, QueryCacheKey};

/// Freshness windows for one kind of cached read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Age after which a hit is refetched.
    pub stale_after: TimeDelta,
    /// Age after which entries are removed from the store.
    pub gc_after: TimeDelta,
}

impl CachePolicy {
    /// Category lookups: 30 minutes fresh, collected after an hour.
    pub const CATEGORIES: Self = Self {
        stale_after: TimeDelta::minutes(30),
        gc_after: TimeDelta::minutes(60),
    };
}

/// Read-through cache service over a [`QueryCache`] store.
#[derive(Clone)]
pub struct ReadThroughCache {
    store: Arc<dyn QueryCache>,
    clock: Arc<dyn Clock>,
}

impl ReadThroughCache {
    pub fn new(store: Arc<dyn QueryCache>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Return the cached value for `key` while it is fresh, otherwise run
    /// `fetch` and cache its result.
    ///
    /// Store failures are logged and treated as misses. Fetch failures are
    /// returned and leave the cache untouched.
    ///
    /// # Errors
    /// Propagates the error returned by `fetch`.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: &QueryCacheKey,
        policy: CachePolicy,
        fetch: F,
    ) -> Result<Value, Error>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<Value, Error>> + Send,
    {
        let now = self.clock.utc();
        if let Err(error) = self.store.purge_older_than(now - policy.gc_after).await {
            warn!(%error, "query cache purge failed");
        }
        match self.store.get(key).await {
            Ok(Some(entry)) if now - entry.fetched_at < policy.stale_after => {
                return Ok(entry.value);
            }
            Ok(_) => {}
            Err(error) => warn!(%error, key = key.as_str(), "query cache read failed"),
        }

        let value = fetch().await?;
        let entry = CachedEntry {
            value: value.clone(),
            fetched_at: self.clock.utc(),
        };
        if let Err(error) = self.store.put(key, entry).await {
            warn!(%error, key = key.as_str(), "query cache write failed");
        }
        Ok(value)
    }

    /// Cached value for `key` regardless of age.
    pub async fn peek(&self, key: &QueryCacheKey) -> Option<Value> {
        match self.store.get(key).await {
            Ok(entry) => entry.map(|entry| entry.value),
            Err(error) => {
                warn!(%error, key = key.as_str(), "query cache read failed");
                None
            }
        }
    }

    /// Drop every entry whose key starts with `prefix`.
    pub async fn invalidate(&self, prefix: &str) {
        if let Err(error) = self.store.invalidate_prefix(prefix).await {
            warn!(%error, prefix, "query cache invalidation failed");
        }
    }
}
