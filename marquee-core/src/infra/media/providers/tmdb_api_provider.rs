use std::fmt;

use async_trait::async_trait;
use marquee_model::MediaKind;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::tmdb_search::{SearchHit, SearchPage, VideoHit, VideoList};
use super::{MetadataProvider, ProviderError, SearchRequest};

pub const TMDB_V3_BASE: &str = "https://api.themoviedb.org/3";

/// TMDB v3 client keyed by an API key passed as a query parameter.
#[derive(Clone)]
pub struct TmdbApiProvider {
    http: reqwest::Client,
    api_key: Option<String>,
    language: Option<String>,
    base_url: String,
}

impl fmt::Debug for TmdbApiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbApiProvider")
            .field("configured", &self.api_key.is_some())
            .field("language", &self.language)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl TmdbApiProvider {
    /// Builds a provider; a missing or blank key yields a disabled provider.
    pub fn new(api_key: Option<String>) -> Self {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        Self {
            http: reqwest::Client::new(),
            api_key,
            language: None,
            base_url: TMDB_V3_BASE.to_string(),
        }
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language.filter(|l| !l.trim().is_empty());
        self
    }

    /// Points the client at another API root (proxies, local fixtures).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    fn api_key(&self) -> Result<&str, ProviderError> {
        self.api_key.as_deref().ok_or(ProviderError::NotConfigured)
    }

    async fn get_tmdb_json<T>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        let response = self.http.get(url).query(query).send().await?;

        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            return serde_json::from_str::<T>(&body)
                .map_err(|e| ProviderError::ParseError(e.to_string()));
        }

        #[derive(Debug, Deserialize)]
        struct TmdbErrorBody {
            #[serde(default)]
            status_message: Option<String>,
        }

        let message = response
            .json::<TmdbErrorBody>()
            .await
            .ok()
            .and_then(|body| body.status_message)
            .unwrap_or_else(|| {
                format!("TMDB request failed with status {}", status)
            });

        match status.as_u16() {
            401 => Err(ProviderError::InvalidApiKey),
            404 => Err(ProviderError::NotFound),
            429 => Err(ProviderError::RateLimited),
            _ => Err(ProviderError::ApiError(message)),
        }
    }
}

#[async_trait]
impl MetadataProvider for TmdbApiProvider {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Search for movies or series by title, narrowed by year when given
    async fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<SearchHit>, ProviderError> {
        let api_key = self.api_key()?;
        let url =
            format!("{}/search/{}", self.base_url, request.kind.tmdb_segment());

        let mut query = vec![
            ("api_key", api_key),
            ("query", request.query.as_str()),
            ("include_adult", "false"),
        ];
        if let Some(year) = request.year.as_deref() {
            query.push((request.kind.year_param(), year));
        }
        if let Some(language) = self.language.as_deref() {
            query.push(("language", language));
        }

        debug!(
            kind = %request.kind,
            query = %request.query,
            year = ?request.year,
            "TMDB search"
        );
        let page: SearchPage<SearchHit> =
            self.get_tmdb_json(&url, &query).await?;
        Ok(page.results)
    }

    /// Get videos (trailers, teasers, clips, ...) for a movie or series
    async fn videos(
        &self,
        kind: MediaKind,
        tmdb_id: u64,
    ) -> Result<Vec<VideoHit>, ProviderError> {
        let api_key = self.api_key()?;
        let url = format!(
            "{}/{}/{}/videos",
            self.base_url,
            kind.tmdb_segment(),
            tmdb_id
        );

        debug!(%kind, tmdb_id, "TMDB videos");
        let list: VideoList =
            self.get_tmdb_json(&url, &[("api_key", api_key)]).await?;
        Ok(list.results)
    }
}
