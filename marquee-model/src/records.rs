//! Watchlist records: the spreadsheet row, the TMDB match and their merge.

use crate::error::{ModelError, Result};
use crate::media_kind::MediaKind;

/// One title entry sourced from the spreadsheet.
///
/// Free-form descriptive fields are kept as the sheet spelled them; an
/// empty string means the column was blank or missing. Image references and
/// the synopsis are optional because TMDB may fill them in later.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseRecord {
    pub kind: MediaKind,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub year: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub genre: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub service: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rating: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub notes: String,
    /// Subtitle availability as written in the sheet ("yes", "EN", ...).
    #[cfg_attr(feature = "serde", serde(default))]
    pub subs: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub votes: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rotten_tomatoes: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub overview: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub poster: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub backdrop: Option<String>,
}

impl BaseRecord {
    /// Creates a record with only the identity fields populated.
    pub fn new(kind: MediaKind, title: impl Into<String>) -> Result<Self> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(ModelError::EmptyTitle(kind));
        }

        Ok(Self {
            kind,
            title,
            year: None,
            genre: String::new(),
            status: String::new(),
            service: String::new(),
            rating: String::new(),
            notes: String::new(),
            subs: String::new(),
            votes: String::new(),
            rotten_tomatoes: String::new(),
            overview: None,
            poster: None,
            backdrop: None,
        })
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = non_empty(Some(year.into()));
        self
    }

    /// Year as it participates in lookup keys: the sheet value or "".
    pub fn year_or_empty(&self) -> &str {
        self.year.as_deref().unwrap_or("")
    }
}

/// Result of a TMDB lookup or a user override.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetadataRecord {
    #[cfg_attr(feature = "serde", serde(default))]
    pub tmdb_id: Option<u64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub poster_url: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub backdrop_url: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub overview: Option<String>,
    /// Vote average rendered with one decimal place, e.g. "8.0".
    #[cfg_attr(feature = "serde", serde(default))]
    pub tmdb_rating: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tmdb_title: Option<String>,
    /// Four-digit year derived from the release or first-air date.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tmdb_year: Option<String>,
}

/// A displayed record: the sheet row plus whatever TMDB contributed.
///
/// `record.poster`, `record.backdrop` and `record.overview` hold the merged
/// values; the `tmdb_*` fields only ever come from metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergedRecord {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub record: BaseRecord,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tmdb_id: Option<u64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tmdb_rating: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tmdb_title: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tmdb_year: Option<String>,
}

impl MergedRecord {
    pub fn has_metadata(&self) -> bool {
        self.tmdb_id.is_some()
            || self.tmdb_rating.is_some()
            || self.tmdb_title.is_some()
            || self.tmdb_year.is_some()
    }

    /// Applies a user-picked match on top of the displayed record.
    ///
    /// Unlike enrichment, a manual correction replaces imagery and synopsis
    /// whenever the picked match carries them.
    pub fn apply_override(&mut self, meta: &MetadataRecord) {
        if let Some(poster) = non_empty(meta.poster_url.clone()) {
            self.record.poster = Some(poster);
        }
        if let Some(backdrop) = non_empty(meta.backdrop_url.clone()) {
            self.record.backdrop = Some(backdrop);
        }
        if let Some(overview) = non_empty(meta.overview.clone()) {
            self.record.overview = Some(overview);
        }
        self.tmdb_id = meta.tmdb_id;
        self.tmdb_rating = meta.tmdb_rating.clone();
        self.tmdb_title = meta.tmdb_title.clone();
        self.tmdb_year = meta.tmdb_year.clone();
    }
}

impl From<BaseRecord> for MergedRecord {
    fn from(record: BaseRecord) -> Self {
        Self {
            record,
            tmdb_id: None,
            tmdb_rating: None,
            tmdb_title: None,
            tmdb_year: None,
        }
    }
}

/// YouTube video key for a trailer or teaser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VideoKey(String);

impl VideoKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl std::fmt::Display for VideoKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Collapses blank strings to `None`.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
