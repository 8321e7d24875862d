use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cache I/O error: {0}")]
    Io(String),

    #[error("cache entry failed integrity check: {0}")]
    Integrity(String),

    #[error("cache entry is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("cache payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("cache backend task failed: {0}")]
    Join(String),

    #[error("cache backend error: {0}")]
    Backend(String),
}

/// String-keyed, string-valued persistence with no transactions.
///
/// Implementations report every failure; the policy of ignoring them lives
/// one layer up in [`CacheStore`](super::CacheStore).
#[async_trait]
pub trait KeyValueStore: Send + Sync + fmt::Debug {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn put_raw(&self, key: &str, value: &str) -> Result<(), StoreError>;

    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Every live key, in no particular order.
    async fn keys(&self) -> Result<Vec<String>, StoreError>;
}
