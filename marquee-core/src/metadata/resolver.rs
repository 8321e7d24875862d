use std::sync::Arc;

use marquee_model::{MediaKind, MetadataRecord};
use tracing::{debug, info};

use super::normalize::normalize_hit;
use crate::infra::cache::{CacheKey, CacheLookup, CacheStore};
use crate::infra::media::providers::{MetadataProvider, SearchRequest};

/// Upper bound on matches offered when correcting a title by hand.
pub const MAX_CANDIDATES: usize = 10;

/// Finds the TMDB match for a sheet title.
///
/// Lookup order is override, then cache, then a remote search. The remote
/// search trusts the provider's relevance ranking and keeps only the first
/// hit; there is no local re-ranking, so a blank year can let a popular
/// remake shadow the intended title.
#[derive(Debug, Clone)]
pub struct MetadataResolver {
    provider: Arc<dyn MetadataProvider>,
    cache: CacheStore,
}

impl MetadataResolver {
    pub fn new(provider: Arc<dyn MetadataProvider>, cache: CacheStore) -> Self {
        Self { provider, cache }
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn provider(&self) -> &Arc<dyn MetadataProvider> {
        &self.provider
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_configured()
    }

    /// Best match for `title`, or `None` when nothing matched.
    ///
    /// Never fails: a disabled provider, a remembered miss and a transient
    /// network error all come back as `None`. Only the first two are
    /// remembered; network errors are retried on the next run.
    pub async fn resolve(
        &self,
        title: &str,
        year: Option<&str>,
        kind: MediaKind,
    ) -> Option<MetadataRecord> {
        if title.trim().is_empty() || !self.provider.is_configured() {
            return None;
        }

        let override_key = CacheKey::override_for(kind, title, year);
        if let CacheLookup::Present(value) =
            self.cache.get_override::<MetadataRecord>(&override_key).await
        {
            debug!(key = %override_key, "using override");
            return value;
        }

        let key = CacheKey::metadata(kind, title, year);
        if let CacheLookup::Present(value) =
            self.cache.get::<MetadataRecord>(&key).await
        {
            return value;
        }

        let request = SearchRequest::new(kind, title.trim()).with_year(year);
        let hits = match self.provider.search(&request).await {
            Ok(hits) => hits,
            Err(err) => {
                debug!(
                    %key,
                    error = %err,
                    "search failed; treating as no match"
                );
                return None;
            }
        };

        let Some(best) = hits.first() else {
            debug!(%key, "no results; caching miss");
            self.cache.put::<MetadataRecord>(&key, None).await;
            return None;
        };

        let record = normalize_hit(best);
        self.cache.put(&key, Some(&record)).await;
        Some(record)
    }

    /// Up to [`MAX_CANDIDATES`] matches for a manual correction.
    ///
    /// Ignores the year to cast a wider net and bypasses both the cache and
    /// overrides.
    pub async fn resolve_candidates(
        &self,
        title: &str,
        kind: MediaKind,
    ) -> Vec<MetadataRecord> {
        if title.trim().is_empty() || !self.provider.is_configured() {
            return Vec::new();
        }

        let request = SearchRequest::new(kind, title.trim());
        match self.provider.search(&request).await {
            Ok(hits) => hits
                .iter()
                .take(MAX_CANDIDATES)
                .map(normalize_hit)
                .collect(),
            Err(err) => {
                debug!(%kind, title, error = %err, "candidate search failed");
                Vec::new()
            }
        }
    }

    /// Records the user's choice for a title; `None` pins "no match".
    pub async fn save_override(
        &self,
        kind: MediaKind,
        title: &str,
        year: Option<&str>,
        meta: Option<&MetadataRecord>,
    ) {
        let key = CacheKey::override_for(kind, title, year);
        info!(%key, tmdb_id = ?meta.and_then(|m| m.tmdb_id), "saving override");
        self.cache.put_override(&key, meta).await;
    }
}
