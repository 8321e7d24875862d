use std::fmt::Write as _;

use marquee_core::Facets;
use marquee_core::model::{MediaKind, MergedRecord, MetadataRecord};

const TITLE_WIDTH: usize = 36;

/// Plain-text table of merged records.
pub fn table(kind: MediaKind, records: &[&MergedRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{kind} ({})", records.len());
    let _ = writeln!(
        out,
        "{:<width$}  {:<4}  {:<14}  {:<12}  {:>5}  {:>5}",
        "Title",
        "Year",
        "Status",
        "Service",
        "Sheet",
        "TMDB",
        width = TITLE_WIDTH
    );

    for merged in records {
        let record = &merged.record;
        let _ = writeln!(
            out,
            "{:<width$}  {:<4}  {:<14}  {:<12}  {:>5}  {:>5}",
            truncate(&record.title, TITLE_WIDTH),
            record.year_or_empty(),
            truncate(&record.status, 14),
            truncate(&record.service, 12),
            truncate(&record.rating, 5),
            merged.tmdb_rating.as_deref().unwrap_or("-"),
            width = TITLE_WIDTH
        );
    }
    out
}

pub fn facets(kind: MediaKind, facets: &Facets) -> String {
    format!(
        "{kind} genres: {}\n{kind} statuses: {}\n{kind} services: {}\n",
        facets.genres.join(", "),
        facets.statuses.join(", "),
        facets.services.join(", ")
    )
}

/// Numbered candidate list, 1-based to match `override --pick`.
pub fn candidates(candidates: &[MetadataRecord]) -> String {
    let mut out = String::new();
    for (i, candidate) in candidates.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. {} ({}) tmdb:{} rating:{}",
            i + 1,
            candidate.tmdb_title.as_deref().unwrap_or("?"),
            candidate.tmdb_year.as_deref().unwrap_or("----"),
            candidate
                .tmdb_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".into()),
            candidate.tmdb_rating.as_deref().unwrap_or("-"),
        );
    }
    out
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
