use marquee_model::{ImageSize, MetadataRecord, non_empty};

use crate::infra::media::providers::SearchHit;

/// Converts a raw search hit into the record the rest of the app stores.
///
/// - image paths become absolute CDN URLs (posters at w500, backdrops at
///   original size)
/// - the vote average is rendered with one decimal; zero means unrated
/// - the year is the first four characters of the release or air date
pub fn normalize_hit(hit: &SearchHit) -> MetadataRecord {
    MetadataRecord {
        tmdb_id: Some(hit.id),
        poster_url: hit
            .poster_path
            .as_deref()
            .and_then(|path| ImageSize::poster().url_for(path)),
        backdrop_url: hit
            .backdrop_path
            .as_deref()
            .and_then(|path| ImageSize::backdrop().url_for(path)),
        overview: non_empty(hit.overview.clone()),
        tmdb_rating: hit
            .vote_average
            .filter(|vote| *vote != 0.0 && vote.is_finite())
            .map(format_rating),
        tmdb_title: non_empty(hit.title.clone())
            .or_else(|| non_empty(hit.name.clone())),
        tmdb_year: first_non_empty(&[&hit.release_date, &hit.first_air_date])
            .map(|date| date.chars().take(4).collect::<String>()),
    }
}

/// One decimal place; a value exactly halfway between two tenths rounds
/// away from zero (6.25 -> "6.3"), everything else rounds to the nearest
/// tenth.
fn format_rating(vote: f64) -> String {
    let twentieths = vote * 20.0;
    let exact = vote.mul_add(20.0, -twentieths) == 0.0;
    let halfway =
        exact && twentieths.fract() == 0.0 && twentieths % 2.0 != 0.0;

    if halfway {
        format!("{:.1}", (twentieths + twentieths.signum()) / 20.0)
    } else {
        format!("{vote:.1}")
    }
}

fn first_non_empty<'a>(dates: &[&'a Option<String>]) -> Option<&'a str> {
    dates
        .iter()
        .filter_map(|date| date.as_deref())
        .find(|date| !date.trim().is_empty())
}
