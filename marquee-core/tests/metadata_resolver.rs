mod common;

use std::sync::Arc;

use common::{
    BrokenStore, FakeProvider, heat_provider, memory_cache, movie_hit,
    resolver,
};
use marquee_core::model::{MediaKind, MetadataRecord};
use marquee_core::{CacheKey, CacheLookup, CacheStore, SearchHit};

fn dune_hit() -> SearchHit {
    SearchHit {
        id: 438631,
        title: Some("Dune".into()),
        poster_path: Some("/abc.jpg".into()),
        vote_average: Some(8.0),
        release_date: Some("2021-09-15".into()),
        ..Default::default()
    }
}

#[tokio::test]
async fn resolves_dune_and_caches_it() {
    let provider = Arc::new(
        FakeProvider::configured().with_hits("Dune", vec![dune_hit()]),
    );
    let (_, cache) = memory_cache();
    let resolver = resolver(&provider, cache.clone());

    let record = resolver
        .resolve("Dune", Some("2021"), MediaKind::Movie)
        .await
        .expect("dune should resolve");

    assert_eq!(record.tmdb_id, Some(438631));
    assert_eq!(
        record.poster_url.as_deref(),
        Some("https://image.tmdb.org/t/p/w500/abc.jpg")
    );
    assert_eq!(record.tmdb_rating.as_deref(), Some("8.0"));
    assert_eq!(record.tmdb_year.as_deref(), Some("2021"));

    let request = provider.requests.lock().unwrap()[0].clone();
    assert_eq!(request.query, "Dune");
    assert_eq!(request.year.as_deref(), Some("2021"));

    let key = CacheKey::metadata(MediaKind::Movie, "dune", Some("2021"));
    let cached = cache.get::<MetadataRecord>(&key).await;
    assert_eq!(cached, CacheLookup::Present(Some(record)));
}

#[tokio::test]
async fn second_lookup_is_served_from_cache() {
    let provider = heat_provider();
    let (_, cache) = memory_cache();
    let resolver = resolver(&provider, cache);

    let first = resolver.resolve("Heat", Some("1995"), MediaKind::Movie).await;
    let second =
        resolver.resolve("  HEAT ", Some("1995"), MediaKind::Movie).await;

    assert_eq!(first, second);
    assert_eq!(provider.searches(), 1);
}

#[tokio::test]
async fn cached_miss_short_circuits_the_provider() {
    let provider = Arc::new(FakeProvider::configured());
    let (_, cache) = memory_cache();
    let key = CacheKey::metadata(MediaKind::Movie, "Nope", None);
    cache.put::<MetadataRecord>(&key, None).await;
    let resolver = resolver(&provider, cache);

    assert_eq!(resolver.resolve("Nope", None, MediaKind::Movie).await, None);
    assert_eq!(provider.searches(), 0);
}

#[tokio::test]
async fn empty_results_are_remembered() {
    let provider = Arc::new(FakeProvider::configured());
    let (_, cache) = memory_cache();
    let resolver = resolver(&provider, cache.clone());

    for _ in 0..2 {
        let found = resolver.resolve("Obscure", None, MediaKind::Series).await;
        assert_eq!(found, None);
    }
    assert_eq!(provider.searches(), 1);

    let key = CacheKey::metadata(MediaKind::Series, "obscure", None);
    assert_eq!(
        cache.get::<MetadataRecord>(&key).await,
        CacheLookup::Present(None)
    );
}

#[tokio::test]
async fn missing_credential_never_touches_cache_or_network() {
    let provider = Arc::new(FakeProvider::default());
    let (backend, cache) = memory_cache();
    let resolver = resolver(&provider, cache);

    assert!(!resolver.is_enabled());
    assert_eq!(resolver.resolve("Dune", None, MediaKind::Movie).await, None);
    let candidates =
        resolver.resolve_candidates("Dune", MediaKind::Movie).await;
    assert!(candidates.is_empty());
    assert_eq!(provider.searches(), 0);
    assert!(backend.is_empty());
}

#[tokio::test]
async fn empty_title_resolves_to_nothing() {
    let provider = Arc::new(FakeProvider::configured());
    let (backend, cache) = memory_cache();
    let resolver = resolver(&provider, cache);

    assert_eq!(resolver.resolve("   ", None, MediaKind::Movie).await, None);
    assert_eq!(provider.searches(), 0);
    assert!(backend.is_empty());
}

#[tokio::test]
async fn network_failure_is_not_cached() {
    let provider = Arc::new(FakeProvider::configured().failing_on("Heat"));
    let (backend, cache) = memory_cache();
    let resolver = resolver(&provider, cache);

    assert_eq!(resolver.resolve("Heat", None, MediaKind::Movie).await, None);
    assert_eq!(resolver.resolve("Heat", None, MediaKind::Movie).await, None);
    assert_eq!(provider.searches(), 2);
    assert!(backend.is_empty());
}

#[tokio::test]
async fn override_wins_over_a_differing_cache_entry() {
    let provider = Arc::new(FakeProvider::configured());
    let (_, cache) = memory_cache();
    let cached = MetadataRecord {
        tmdb_id: Some(1),
        ..Default::default()
    };
    let chosen = MetadataRecord {
        tmdb_id: Some(2),
        tmdb_title: Some("Solaris".into()),
        ..Default::default()
    };
    let key = CacheKey::metadata(MediaKind::Movie, "Solaris", Some("1972"));
    cache.put(&key, Some(&cached)).await;

    let resolver = resolver(&provider, cache);
    resolver
        .save_override(MediaKind::Movie, "Solaris", Some("1972"), Some(&chosen))
        .await;

    assert_eq!(
        resolver.resolve("solaris", Some("1972"), MediaKind::Movie).await,
        Some(chosen)
    );
    assert_eq!(provider.searches(), 0);
}

#[tokio::test]
async fn null_override_pins_no_match() {
    let provider = heat_provider();
    let (_, cache) = memory_cache();
    let resolver = resolver(&provider, cache);

    resolver
        .save_override(MediaKind::Movie, "Heat", None, None)
        .await;

    assert_eq!(resolver.resolve("Heat", None, MediaKind::Movie).await, None);
    assert_eq!(provider.searches(), 0);
}

#[tokio::test]
async fn candidates_ignore_year_and_cache() {
    let hits = (1..=12)
        .map(|id| movie_hit(id, "Solaris", "2002-11-27"))
        .collect();
    let provider =
        Arc::new(FakeProvider::configured().with_hits("Solaris", hits));
    let (backend, cache) = memory_cache();
    let resolver = resolver(&provider, cache);

    let candidates =
        resolver.resolve_candidates("Solaris", MediaKind::Movie).await;

    assert_eq!(candidates.len(), 10);
    let ids: Vec<_> = candidates.iter().filter_map(|c| c.tmdb_id).collect();
    assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    assert_eq!(provider.requests.lock().unwrap()[0].year, None);
    assert!(backend.is_empty());
}

#[tokio::test]
async fn broken_store_degrades_to_uncached_lookups() {
    let provider = heat_provider();
    let cache = CacheStore::new(Arc::new(BrokenStore));
    let resolver = resolver(&provider, cache);

    let first = resolver.resolve("Heat", None, MediaKind::Movie).await;
    let second = resolver.resolve("Heat", None, MediaKind::Movie).await;

    assert_eq!(first.and_then(|r| r.tmdb_id), Some(949));
    assert_eq!(second.and_then(|r| r.tmdb_id), Some(949));
    assert_eq!(provider.searches(), 2);
}
