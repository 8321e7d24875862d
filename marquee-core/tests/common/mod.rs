#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use marquee_core::{
    CacheStore, KeyValueStore, MemoryKeyValueStore, MetadataProvider,
    MetadataResolver, ProviderError, SearchHit, SearchRequest, StoreError,
    VideoHit,
};
use marquee_core::model::MediaKind;

/// Scripted provider that counts calls and tracks peak concurrency.
#[derive(Debug, Default)]
pub struct FakeProvider {
    pub configured: bool,
    pub hits: HashMap<String, Vec<SearchHit>>,
    pub videos: HashMap<u64, Vec<VideoHit>>,
    pub failing: Vec<String>,
    pub delay: Option<Duration>,
    pub search_calls: AtomicUsize,
    pub video_calls: AtomicUsize,
    pub requests: std::sync::Mutex<Vec<SearchRequest>>,
    in_flight: AtomicUsize,
    pub peak_in_flight: AtomicUsize,
}

impl FakeProvider {
    pub fn configured() -> Self {
        Self {
            configured: true,
            ..Default::default()
        }
    }

    pub fn with_hits(mut self, query: &str, hits: Vec<SearchHit>) -> Self {
        self.hits.insert(query.to_string(), hits);
        self
    }

    pub fn with_videos(mut self, tmdb_id: u64, videos: Vec<VideoHit>) -> Self {
        self.videos.insert(tmdb_id, videos);
        self
    }

    pub fn failing_on(mut self, query: &str) -> Self {
        self.failing.push(query.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn searches(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn video_lookups(&self) -> usize {
        self.video_calls.load(Ordering::SeqCst)
    }

    pub fn peak(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataProvider for FakeProvider {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<SearchHit>, ProviderError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(&request.query) {
            return Err(ProviderError::ApiError("boom".into()));
        }
        Ok(self.hits.get(&request.query).cloned().unwrap_or_default())
    }

    async fn videos(
        &self,
        _kind: MediaKind,
        tmdb_id: u64,
    ) -> Result<Vec<VideoHit>, ProviderError> {
        self.video_calls.fetch_add(1, Ordering::SeqCst);
        match self.videos.get(&tmdb_id) {
            Some(videos) => Ok(videos.clone()),
            None => Err(ProviderError::NotFound),
        }
    }
}

/// Backend whose every operation fails.
#[derive(Debug, Default)]
pub struct BrokenStore;

#[async_trait]
impl KeyValueStore for BrokenStore {
    async fn get_raw(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Backend("quota exceeded".into()))
    }

    async fn put_raw(
        &self,
        _key: &str,
        _value: &str,
    ) -> Result<(), StoreError> {
        Err(StoreError::Backend("quota exceeded".into()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Backend("quota exceeded".into()))
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        Err(StoreError::Backend("quota exceeded".into()))
    }
}

pub fn movie_hit(id: u64, title: &str, date: &str) -> SearchHit {
    SearchHit {
        id,
        title: Some(title.to_string()),
        poster_path: Some(format!("/{id}.jpg")),
        backdrop_path: Some(format!("/{id}-bg.jpg")),
        overview: Some(format!("{title} overview")),
        vote_average: Some(7.4),
        release_date: Some(date.to_string()),
        ..Default::default()
    }
}

/// Provider that knows only "Heat" (1995, TMDB id 949).
pub fn heat_provider() -> Arc<FakeProvider> {
    let heat = movie_hit(949, "Heat", "1995-12-15");
    Arc::new(FakeProvider::configured().with_hits("Heat", vec![heat]))
}

pub fn memory_cache() -> (Arc<MemoryKeyValueStore>, CacheStore) {
    let backend = Arc::new(MemoryKeyValueStore::new());
    let cache = CacheStore::new(backend.clone());
    (backend, cache)
}

pub fn resolver(
    provider: &Arc<FakeProvider>,
    cache: CacheStore,
) -> MetadataResolver {
    MetadataResolver::new(provider.clone(), cache)
}
