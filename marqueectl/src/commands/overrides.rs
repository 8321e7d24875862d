use anyhow::{Result, bail};
use marquee_core::Catalog;
use marquee_core::model::{
    BaseRecord, MediaKind, MergedRecord, MetadataRecord,
};
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::render;

pub async fn candidates(
    ctx: &AppContext,
    title: &str,
    kind: MediaKind,
) -> Result<()> {
    let resolver = ctx.resolver();
    if !resolver.is_enabled() {
        bail!("no TMDB API key configured; set TMDB_API_KEY");
    }

    let candidates = resolver.resolve_candidates(title, kind).await;
    if candidates.is_empty() {
        println!("No matches for \"{title}\"");
        return Ok(());
    }
    print!("{}", render::candidates(&candidates));
    Ok(())
}

/// Saves candidate `pick` (1-based) as the override; `0` pins "no match".
///
/// Prints the sheet rows the correction now applies to. Without a
/// configured sheet, or when no row matches, prints the bare record.
pub async fn save(
    ctx: &AppContext,
    title: &str,
    year: Option<&str>,
    kind: MediaKind,
    pick: usize,
) -> Result<()> {
    let resolver = ctx.resolver();
    if !resolver.is_enabled() {
        bail!("no TMDB API key configured; set TMDB_API_KEY");
    }

    let base = match year {
        Some(year) => BaseRecord::new(kind, title)?.with_year(year),
        None => BaseRecord::new(kind, title)?,
    };

    let chosen = if pick == 0 {
        None
    } else {
        let candidates = resolver.resolve_candidates(title, kind).await;
        match candidates.into_iter().nth(pick - 1) {
            Some(candidate) => Some(candidate),
            None => bail!(
                "no candidate #{pick} for \"{title}\"; \
                 run `marqueectl candidates` first"
            ),
        }
    };

    let year = base.year.as_deref();
    resolver
        .save_override(kind, &base.title, year, chosen.as_ref())
        .await;

    let mut catalog = if ctx.config.sheet.id.is_some() {
        Some(ctx.catalog_loader()?.load().await?)
    } else {
        debug!("no sheet configured; showing the bare record");
        None
    };

    let displayed = corrected(catalog.as_mut(), base, chosen.as_ref());
    println!("{}", serde_json::to_string_pretty(&displayed)?);
    Ok(())
}

/// Records as displayed after the correction.
///
/// With a catalog, these are its rows matching `base`'s title and year, with
/// `chosen` applied in place. Falls back to `base` alone when there is no
/// catalog or no row matches.
fn corrected(
    catalog: Option<&mut Catalog>,
    base: BaseRecord,
    chosen: Option<&MetadataRecord>,
) -> Vec<MergedRecord> {
    let year = base.year.clone();
    let matches = |record: &MergedRecord| {
        record.record.title == base.title && record.record.year == year
    };

    if let Some(catalog) = catalog {
        if let Some(meta) = chosen {
            let year = year.as_deref();
            catalog.apply_override(base.kind, &base.title, year, meta);
        }
        let rows: Vec<MergedRecord> = catalog
            .records(base.kind)
            .iter()
            .filter(|record| matches(record))
            .cloned()
            .collect();
        if !rows.is_empty() {
            return rows;
        }
        warn!(title = %base.title, "no sheet row matches this title and year");
    }

    let mut merged = MergedRecord::from(base);
    if let Some(meta) = chosen {
        merged.apply_override(meta);
    }
    vec![merged]
}
