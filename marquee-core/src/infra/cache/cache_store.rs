use std::{fmt, sync::Arc, time::Duration};

use chrono::Utc;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

use super::keys::{CacheKey, is_override_key};
use super::kv_store::{KeyValueStore, StoreError};

/// Seven days.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Outcome of a cache read.
///
/// `Present(None)` is a remembered miss ("the lookup found nothing") and is
/// distinct from `Absent` ("never looked up, or expired").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup<T> {
    Absent,
    Present(Option<T>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expiry {
    After(Duration),
    Never,
}

/// Serialized form of a TTL entry: write time in unix millis plus payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheEnvelope<T> {
    pub ts: i64,
    pub data: Option<T>,
}

/// Typed cache over a [`KeyValueStore`].
///
/// Every persistence failure is logged at debug level and swallowed: reads
/// degrade to [`CacheLookup::Absent`], writes are dropped. Callers only ever
/// see "hit" or "miss".
#[derive(Clone)]
pub struct CacheStore {
    store: Arc<dyn KeyValueStore>,
    ttl: Duration,
}

impl fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheStore")
            .field("store", &self.store)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl CacheStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            ttl: DEFAULT_CACHE_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Reads a TTL entry, evicting it when older than the configured TTL.
    pub async fn get<T: DeserializeOwned>(
        &self,
        key: &CacheKey,
    ) -> CacheLookup<T> {
        self.read_entry(key, Expiry::After(self.ttl)).await
    }

    /// Writes a TTL entry stamped with the current time. `None` records a
    /// miss.
    pub async fn put<T: Serialize>(&self, key: &CacheKey, value: Option<&T>) {
        self.write_entry(key, value).await;
    }

    /// Reads an entry written by [`put`](Self::put) but ignores its age.
    pub async fn get_pinned<T: DeserializeOwned>(
        &self,
        key: &CacheKey,
    ) -> CacheLookup<T> {
        self.read_entry(key, Expiry::Never).await
    }

    pub async fn put_pinned<T: Serialize>(
        &self,
        key: &CacheKey,
        value: Option<&T>,
    ) {
        self.write_entry(key, value).await;
    }

    /// Reads a user override. Overrides never expire.
    pub async fn get_override<T: DeserializeOwned>(
        &self,
        key: &CacheKey,
    ) -> CacheLookup<T> {
        let raw = match self.store.get_raw(key.as_str()).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return CacheLookup::Absent,
            Err(err) => {
                debug!(%key, error = %err, "override read failed");
                return CacheLookup::Absent;
            }
        };

        match serde_json::from_str::<Option<T>>(&raw) {
            Ok(value) => CacheLookup::Present(value),
            Err(err) => {
                debug!(%key, error = %err, "override payload unreadable");
                CacheLookup::Absent
            }
        }
    }

    /// Stores a user override verbatim; `None` pins "no match".
    pub async fn put_override<T: Serialize>(
        &self,
        key: &CacheKey,
        value: Option<&T>,
    ) {
        let raw = match serde_json::to_string(&value) {
            Ok(raw) => raw,
            Err(err) => {
                debug!(%key, error = %err, "override payload not serializable");
                return;
            }
        };

        if let Err(err) = self.store.put_raw(key.as_str(), &raw).await {
            debug!(%key, error = %err, "override write dropped");
        }
    }

    /// Removes cached lookups, and overrides too when asked. Returns how many
    /// entries were removed.
    pub async fn clear(
        &self,
        include_overrides: bool,
    ) -> Result<usize, StoreError> {
        let mut removed = 0;
        for key in self.store.keys().await? {
            if is_override_key(&key) && !include_overrides {
                continue;
            }
            self.store.remove(&key).await?;
            removed += 1;
        }
        Ok(removed)
    }

    async fn read_entry<T: DeserializeOwned>(
        &self,
        key: &CacheKey,
        expiry: Expiry,
    ) -> CacheLookup<T> {
        let raw = match self.store.get_raw(key.as_str()).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(%key, "cache miss");
                return CacheLookup::Absent;
            }
            Err(err) => {
                debug!(%key, error = %err, "cache read failed");
                return CacheLookup::Absent;
            }
        };

        let envelope = match serde_json::from_str::<CacheEnvelope<T>>(&raw) {
            Ok(envelope) => envelope,
            Err(err) => {
                debug!(%key, error = %err, "cache entry unreadable");
                return CacheLookup::Absent;
            }
        };

        if let Expiry::After(ttl) = expiry
            && is_expired(envelope.ts, ttl)
        {
            debug!(%key, "cache entry expired");
            if let Err(err) = self.store.remove(key.as_str()).await {
                debug!(%key, error = %err, "expired entry not removed");
            }
            return CacheLookup::Absent;
        }

        debug!(%key, "cache hit");
        CacheLookup::Present(envelope.data)
    }

    async fn write_entry<T: Serialize>(
        &self,
        key: &CacheKey,
        value: Option<&T>,
    ) {
        let envelope = CacheEnvelope {
            ts: Utc::now().timestamp_millis(),
            data: value,
        };

        let raw = match serde_json::to_string(&envelope) {
            Ok(raw) => raw,
            Err(err) => {
                debug!(%key, error = %err, "cache payload not serializable");
                return;
            }
        };

        if let Err(err) = self.store.put_raw(key.as_str(), &raw).await {
            debug!(%key, error = %err, "cache write dropped");
        }
    }
}

fn is_expired(written_at_ms: i64, ttl: Duration) -> bool {
    let age_ms = Utc::now().timestamp_millis().saturating_sub(written_at_ms);
    let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
    age_ms > ttl_ms
}
