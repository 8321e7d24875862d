use std::path::PathBuf;
use std::time::Duration;

use crate::loader::error::ConfigLoadError;

pub const DEFAULT_MOVIES_SHEET: &str = "movies";
pub const DEFAULT_SERIES_SHEET: &str = "List";
pub const DEFAULT_CACHE_DIR: &str = "./.marquee-cache";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);
pub const DEFAULT_BATCH_SIZE: usize = 8;

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub tmdb: TmdbConfig,
    pub sheet: SheetConfig,
    pub cache: CacheConfig,
    pub enrichment: EnrichmentConfig,
    pub metadata: ConfigMetadata,
}

impl AppConfig {
    /// Spreadsheet id, or an error naming the variable to set.
    pub fn require_sheet_id(&self) -> Result<&str, ConfigLoadError> {
        self.sheet
            .id
            .as_deref()
            .ok_or(ConfigLoadError::MissingSheetId)
    }
}

#[derive(Clone, PartialEq, Eq, Default)]
pub struct TmdbConfig {
    /// `None` disables enrichment without failing anything.
    pub api_key: Option<String>,
    pub language: Option<String>,
}

impl std::fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("language", &self.language)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetConfig {
    pub id: Option<String>,
    pub movies: String,
    pub series: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            id: None,
            movies: DEFAULT_MOVIES_SHEET.to_string(),
            series: DEFAULT_SERIES_SHEET.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub dir: PathBuf,
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_CACHE_DIR),
            ttl: DEFAULT_CACHE_TTL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentConfig {
    /// Always at least one.
    pub batch_size: usize,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Where the configuration came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
