use marquee_model::{BaseRecord, MergedRecord, MetadataRecord, non_empty};

/// Combines a sheet row with its TMDB match.
///
/// Precedence:
/// - every sheet field wins over the match,
/// - poster, backdrop and overview fall back to the match when the sheet
///   left them blank,
/// - the rating always comes from the match,
/// - `tmdb_id`, `tmdb_title` and `tmdb_year` exist only on the match.
///
/// Without a match the row is returned unchanged.
pub fn merge(base: &BaseRecord, meta: Option<&MetadataRecord>) -> MergedRecord {
    let Some(meta) = meta else {
        return MergedRecord::from(base.clone());
    };

    let mut record = base.clone();
    record.poster =
        non_empty(base.poster.clone()).or_else(|| meta.poster_url.clone());
    record.backdrop =
        non_empty(base.backdrop.clone()).or_else(|| meta.backdrop_url.clone());
    record.overview =
        non_empty(base.overview.clone()).or_else(|| meta.overview.clone());

    MergedRecord {
        record,
        tmdb_id: meta.tmdb_id,
        tmdb_rating: meta.tmdb_rating.clone(),
        tmdb_title: meta.tmdb_title.clone(),
        tmdb_year: meta.tmdb_year.clone(),
    }
}
