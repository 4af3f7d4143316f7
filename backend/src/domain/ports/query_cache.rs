//! Port interface for the read-through query cache store.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by the caching adapter.
    pub enum QueryCacheError {
        /// Cache store is unavailable.
        Backend { message: String } => "query cache backend failure: {message}",
    }
}

define_port_error! {
    /// Validation errors for [`QueryCacheKey`].
    pub enum QueryCacheKeyValidationError {
        /// Keys must contain at least one non-whitespace character.
        Empty => "query cache key must not be empty",
    }
}

/// Key addressing one cached query result, such as `categories:all`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryCacheKey(String);

impl QueryCacheKey {
    /// Validate and wrap a key.
    ///
    /// # Errors
    /// Returns [`QueryCacheKeyValidationError::Empty`] for blank keys.
    pub fn new(key: impl Into<String>) -> Result<Self, QueryCacheKeyValidationError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(QueryCacheKeyValidationError::empty());
        }
        Ok(Self(key))
    }

    /// Borrow the key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for QueryCacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A cached value and the instant it was fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedEntry {
    /// Cached payload.
    pub value: Value,
    /// When the payload was fetched from its source.
    pub fetched_at: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueryCache: Send + Sync {
    /// Read the entry stored under `key`.
    async fn get(&self, key: &QueryCacheKey) -> Result<Option<CachedEntry>, QueryCacheError>;

    /// Store `entry` under `key`, replacing any previous entry.
    async fn put(&self, key: &QueryCacheKey, entry: CachedEntry) -> Result<(), QueryCacheError>;

    /// Drop the entry stored under `key`.
    async fn invalidate(&self, key: &QueryCacheKey) -> Result<(), QueryCacheError>;

    /// Drop every entry whose key starts with `prefix`.
    async fn invalidate_prefix(&self, prefix: &str) -> Result<(), QueryCacheError>;

    /// Drop entries fetched before `cutoff` and report how many went.
    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, QueryCacheError>;
}
