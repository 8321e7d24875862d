use std::fmt;

use marquee_model::MediaKind;

const METADATA_PREFIX: &str = "tmdb:";
const OVERRIDE_PREFIX: &str = "tmdb:override:";
const TRAILER_PREFIX: &str = "tmdb:trailer:";

/// Stable key for one logical cache or override entry.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_override(&self) -> bool {
        is_override_key(&self.0)
    }

    /// Key for a resolved search result (TTL namespace).
    pub fn metadata(kind: MediaKind, title: &str, year: Option<&str>) -> Self {
        let mut key = String::from(METADATA_PREFIX);
        push_title_year(&mut key, kind, title, year);
        Self(key)
    }

    /// Key for a user-chosen match (override namespace, never expires).
    pub fn override_for(
        kind: MediaKind,
        title: &str,
        year: Option<&str>,
    ) -> Self {
        let mut key = String::from(OVERRIDE_PREFIX);
        push_title_year(&mut key, kind, title, year);
        Self(key)
    }

    /// Key for a trailer lookup by TMDB id.
    pub fn trailer(kind: MediaKind, tmdb_id: u64) -> Self {
        Self(format!("{TRAILER_PREFIX}{}:{tmdb_id}", kind.tmdb_segment()))
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CacheKey").field(&self.0).finish()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn is_override_key(raw: &str) -> bool {
    raw.starts_with(OVERRIDE_PREFIX)
}

/// Lowercases a title and collapses every whitespace run into one `_`.
///
/// Leading and trailing whitespace is dropped so that incidental padding in
/// the sheet never produces a second key for the same title.
pub fn normalize_title(title: &str) -> String {
    title
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

fn push_title_year(
    key: &mut String,
    kind: MediaKind,
    title: &str,
    year: Option<&str>,
) {
    key.push_str(kind.tmdb_segment());
    key.push(':');
    key.push_str(&normalize_title(title));
    key.push(':');
    key.push_str(year.map(str::trim).unwrap_or(""));
}
