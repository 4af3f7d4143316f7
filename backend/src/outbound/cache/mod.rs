//! In-memory query cache adapter.
//!
//! Implements the `QueryCache` port with a mutex-guarded map. Entries live for
//! the lifetime of the process; the read-through service purges them by age.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{CachedEntry, QueryCache, QueryCacheError, QueryCacheKey};

/// Process-local cache store.
#[derive(Debug, Default)]
pub struct InMemoryQueryCache {
    entries: Mutex<HashMap<QueryCacheKey, CachedEntry>>,
}

impl InMemoryQueryCache {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<QueryCacheKey, CachedEntry>> {
        // A panic while holding the lock cannot leave a half-written entry.
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl QueryCache for InMemoryQueryCache {
    async fn get(&self, key: &QueryCacheKey) -> Result<Option<CachedEntry>, QueryCacheError> {
        Ok(self.entries().get(key).cloned())
    }

    async fn put(&self, key: &QueryCacheKey, entry: CachedEntry) -> Result<(), QueryCacheError> {
        self.entries().insert(key.clone(), entry);
        Ok(())
    }

    async fn invalidate(&self, key: &QueryCacheKey) -> Result<(), QueryCacheError> {
        self.entries().remove(key);
        Ok(())
    }

    async fn invalidate_prefix(&self, prefix: &str) -> Result<(), QueryCacheError> {
        self.entries()
            .retain(|key, _| !key.as_str().starts_with(prefix));
        Ok(())
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, QueryCacheError> {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|_, entry| entry.fetched_at >= cutoff);
        Ok(before - entries.len())
    }
}
