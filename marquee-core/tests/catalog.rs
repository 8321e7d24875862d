mod common;

use std::sync::Arc;

use common::{
    FakeProvider, heat_provider, memory_cache, movie_hit, resolver,
};
use marquee_core::model::{BaseRecord, MediaKind, MetadataRecord};
use marquee_core::{
    Catalog, CatalogLoader, CatalogQuery, EnrichmentPipeline, MarqueeError,
    SheetClient, SortOrder,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

const MOVIES_CSV: &str = "\
\"Title\",\"Year\",\"Genre\",\"Status\",\"Rating\",\"Platform\"\n\
\"Heat\",\"1995\",\"Crime, Thriller\",\"Watched\",\"8.3\",\"Netflix\"\n\
\"Alien\",\"1979\",\"Horror\",\"Want to watch\",\"8.5\",\"Hulu\"\n\
\"\",\"2000\",\"\",\"\",\"\",\"\"\n";

const SERIES_CSV: &str = "\
\"Show\",\"Watched\",\"Subs\"\n\
\"Lost\",\"Dropped\",\"yes\"\n";

/// Serves one canned CSV body per sheet name, or a 403 for anything else.
async fn serve_sheets() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).to_string();

                let (status, body) = if request.contains("sheet=movies") {
                    ("200 OK", MOVIES_CSV)
                } else if request.contains("sheet=List") {
                    ("200 OK", SERIES_CSV)
                } else {
                    ("403 Forbidden", "")
                };
                let response = format!(
                    "HTTP/1.1 {status}\r\n\
                     content-type: text/csv\r\n\
                     content-length: {}\r\n\
                     connection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{addr}/spreadsheets/d/")
}

fn loader(base: String) -> CatalogLoader {
    CatalogLoader::new(SheetClient::new("sheet-id").with_base_url(base))
}

fn movie(title: &str, year: &str) -> BaseRecord {
    BaseRecord::new(MediaKind::Movie, title)
        .unwrap()
        .with_year(year)
}

#[tokio::test]
async fn loads_both_sheets() {
    let base = serve_sheets().await;
    let catalog = loader(base).load().await.expect("catalog loads");

    let movies = catalog.records(MediaKind::Movie);
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].record.title, "Heat");
    assert_eq!(movies[0].record.service, "Netflix");
    assert_eq!(movies[1].record.rating, "8.5");

    let series = catalog.records(MediaKind::Series);
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].record.status, "Dropped");
    assert_eq!(series[0].record.subs, "yes");
}

#[tokio::test]
async fn failing_sheet_is_fatal_with_hint() {
    let base = serve_sheets().await;
    let loader = loader(base).with_sheet_names("movies", "Private");

    let err = loader.load().await.expect_err("series sheet is forbidden");

    assert!(matches!(err, MarqueeError::Sheet(_)));
    assert!(err.to_string().contains("403"));
    assert!(err.hint().unwrap().contains("Anyone with the link can view"));
}

#[tokio::test]
async fn enrich_fills_both_lists() {
    let provider = Arc::new(
        FakeProvider::configured()
            .with_hits("Heat", vec![movie_hit(949, "Heat", "1995-12-15")])
            .with_hits("Lost", vec![movie_hit(4607, "Lost", "2004-09-22")]),
    );
    let (_, cache) = memory_cache();
    let resolver = Arc::new(resolver(&provider, cache));
    let pipeline = EnrichmentPipeline::new(resolver);

    let mut catalog = Catalog::new(
        vec![
            movie("Heat", "1995"),
            BaseRecord::new(MediaKind::Movie, "Unknown").unwrap(),
        ],
        vec![BaseRecord::new(MediaKind::Series, "Lost").unwrap()],
    );

    let mut observed = 0;
    let [movies, series] = catalog
        .enrich(&pipeline, &CancellationToken::new(), |_, _| observed += 1)
        .await;

    assert_eq!(observed, 2);
    assert_eq!(movies.matched, 1);
    assert_eq!(series.matched, 1);

    let heat = &catalog.records(MediaKind::Movie)[0];
    assert_eq!(heat.tmdb_id, Some(949));
    assert_eq!(
        heat.record.poster.as_deref(),
        Some("https://image.tmdb.org/t/p/w500/949.jpg")
    );
    assert!(!catalog.records(MediaKind::Movie)[1].has_metadata());
    assert_eq!(
        catalog.records(MediaKind::Series)[0].tmdb_year.as_deref(),
        Some("2004")
    );
}

#[tokio::test]
async fn cancelled_enrichment_applies_nothing() {
    let provider = heat_provider();
    let (_, cache) = memory_cache();
    let resolver = Arc::new(resolver(&provider, cache));
    let pipeline = EnrichmentPipeline::new(resolver);
    let mut catalog = Catalog::new(
        vec![BaseRecord::new(MediaKind::Movie, "Heat").unwrap()],
        Vec::new(),
    );

    let cancel = CancellationToken::new();
    cancel.cancel();
    catalog.enrich(&pipeline, &cancel, |_, _| {}).await;

    assert!(!catalog.records(MediaKind::Movie)[0].has_metadata());
}

#[tokio::test]
async fn override_updates_displayed_record_and_query_sees_it() {
    let mut catalog = Catalog::new(
        vec![movie("Solaris", "1972"), movie("Heat", "1995")],
        Vec::new(),
    );
    let chosen = MetadataRecord {
        tmdb_id: Some(593),
        poster_url: Some("https://image.tmdb.org/t/p/w500/solaris.jpg".into()),
        ..Default::default()
    };

    assert_eq!(
        catalog.apply_override(
            MediaKind::Movie,
            "Solaris",
            Some("1972"),
            &chosen,
        ),
        1
    );

    let query = CatalogQuery {
        search: Some("sol".into()),
        sort: SortOrder::YearDesc,
        ..Default::default()
    };
    let hits = catalog.query(MediaKind::Movie, &query);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].tmdb_id, Some(593));
    assert_eq!(
        hits[0].record.poster.as_deref(),
        Some("https://image.tmdb.org/t/p/w500/solaris.jpg")
    );
}
