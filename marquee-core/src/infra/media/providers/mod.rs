pub mod tmdb_api_provider;
pub mod tmdb_search;

use std::fmt;

use async_trait::async_trait;
use marquee_model::MediaKind;

pub use tmdb_api_provider::*;
pub use tmdb_search::{SearchHit, VideoHit};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Not found")]
    NotFound,

    #[error("Rate limited")]
    RateLimited,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Provider is not configured")]
    NotConfigured,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// A title search, optionally narrowed to a release (or first-air) year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub kind: MediaKind,
    pub query: String,
    pub year: Option<String>,
}

impl SearchRequest {
    pub fn new(kind: MediaKind, query: impl Into<String>) -> Self {
        Self {
            kind,
            query: query.into(),
            year: None,
        }
    }

    pub fn with_year(mut self, year: Option<&str>) -> Self {
        self.year = year
            .map(str::trim)
            .filter(|y| !y.is_empty())
            .map(str::to_string);
        self
    }
}

/// Remote metadata source.
///
/// Results are returned in the provider's own relevance order; callers that
/// want a single match take the first element.
#[async_trait]
pub trait MetadataProvider: Send + Sync + fmt::Debug {
    /// `false` when no credential is available. An unconfigured provider is
    /// a supported, silent state rather than an error.
    fn is_configured(&self) -> bool;

    async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<SearchHit>, ProviderError>;

    async fn videos(
        &self,
        kind: MediaKind,
        tmdb_id: u64,
    ) -> Result<Vec<VideoHit>, ProviderError>;
}
