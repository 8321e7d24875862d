use anyhow::Result;
use marquee_core::model::MediaKind;
use marquee_core::{Catalog, CatalogQuery};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::cli::ListArgs;
use crate::context::AppContext;
use crate::render;

pub async fn run(ctx: &AppContext, args: ListArgs) -> Result<()> {
    let mut catalog = ctx.catalog_loader()?.load().await?;

    if args.no_enrich {
        info!("enrichment skipped");
    } else if !ctx.provider.is_configured() {
        info!("no TMDB API key; listing sheet data only");
    } else {
        enrich(ctx, &mut catalog).await;
    }

    let query = CatalogQuery {
        genre: args.genre,
        status: args.status,
        service: args.service,
        search: args.search,
        sort: args.sort.into(),
    };
    let kinds: Vec<MediaKind> = match args.kind {
        Some(kind) => vec![kind.into()],
        None => MediaKind::ALL.to_vec(),
    };

    if args.json {
        let mut out = serde_json::Map::new();
        for kind in &kinds {
            let records = catalog.query(*kind, &query);
            out.insert(
                json_key(*kind).to_string(),
                serde_json::to_value(records)?,
            );
        }
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for kind in kinds {
        println!("{}", render::table(kind, &catalog.query(kind, &query)));
        if args.facets {
            println!("{}", render::facets(kind, &catalog.facets(kind)));
        }
    }
    Ok(())
}

/// Enriches in place; Ctrl+C stops enrichment and keeps what has landed.
async fn enrich(ctx: &AppContext, catalog: &mut Catalog) {
    let pipeline = ctx.pipeline();
    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    let watcher = tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    let totals = [
        catalog.len(MediaKind::Movie),
        catalog.len(MediaKind::Series),
    ];
    let summaries = catalog
        .enrich(&pipeline, &cancel, |batch, _| {
            let total = match batch.kind {
                MediaKind::Movie => totals[0],
                MediaKind::Series => totals[1],
            };
            info!(
                kind = %batch.kind,
                done = batch.indices().end,
                total,
                matched = batch.matched(),
                "enriched batch"
            );
        })
        .await;
    watcher.abort();

    if cancel.is_cancelled() {
        warn!("enrichment interrupted; showing partial results");
    }
    for summary in summaries {
        info!(
            records = summary.records,
            matched = summary.matched,
            "enrichment summary"
        );
    }
}

fn json_key(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "movies",
        MediaKind::Series => "series",
    }
}
