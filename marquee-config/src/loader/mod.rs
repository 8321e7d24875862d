pub mod error;

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::models::{
    AppConfig, CacheConfig, ConfigMetadata, DEFAULT_BATCH_SIZE,
    EnrichmentConfig, SheetConfig, TmdbConfig,
};
use crate::sources::{EnvConfig, FileConfig};
use crate::validation::ConfigWarnings;
use error::ConfigLoadError;

const DEFAULT_CONFIG_LOCATIONS: [&str; 2] =
    ["marquee.toml", "config/marquee.toml"];

#[derive(Debug, Default, Clone)]
struct LoaderOptions {
    config_path: Option<PathBuf>,
    env_file: Option<PathBuf>,
}

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: AppConfig,
    pub warnings: ConfigWarnings,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: LoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Seeds the process environment from `.env` (a missing file is fine),
    /// then composes environment, file and defaults.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                dotenvy::Error::Io(_) => Ok(false),
                _ => Err(err),
            })?,
        };

        let mut load = self.load_with_env(EnvConfig::gather())?;
        load.config.metadata.env_file_loaded = env_file_loaded;
        Ok(load)
    }

    /// Composes an explicit environment layer with the file and defaults.
    /// Does not read `.env` or the process environment.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file, config_path) = self.load_file_config(&env)?;
        compose(file.unwrap_or_default(), env, config_path)
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit_path = (&self.options.config_path, &env.config_path);
        let (path, explicit) = match explicit_path {
            (Some(path), _) | (None, Some(path)) => (path.clone(), true),
            (None, None) => {
                match DEFAULT_CONFIG_LOCATIONS
                    .iter()
                    .map(PathBuf::from)
                    .find(|candidate| candidate.exists())
                {
                    Some(path) => (path, false),
                    None => return Ok((None, None)),
                }
            }
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        let contents = fs::read_to_string(&path).map_err(|source| {
            ConfigLoadError::Io {
                path: path.clone(),
                source,
            }
        })?;
        let file: FileConfig = toml::from_str(&contents).map_err(|source| {
            ConfigLoadError::Parse {
                path: path.clone(),
                source,
            }
        })?;

        debug!(path = %path.display(), "configuration file loaded");
        Ok((Some(file), Some(path)))
    }
}

fn compose(
    file: FileConfig,
    env: EnvConfig,
    config_path: Option<PathBuf>,
) -> Result<ConfigLoad, ConfigLoadError> {
    let mut warnings = ConfigWarnings::default();

    let tmdb = TmdbConfig {
        api_key: env.tmdb_api_key.or(non_blank(file.tmdb.api_key)),
        language: env.tmdb_language.or(non_blank(file.tmdb.language)),
    };
    if tmdb.api_key.is_none() {
        warnings.push_with_hint(
            "No TMDB API key configured; \
             posters, ratings and trailers are disabled",
            "Set TMDB_API_KEY in the environment or in .env",
        );
    }

    let defaults = SheetConfig::default();
    let sheet = SheetConfig {
        id: env.sheet_id.or(non_blank(file.sheet.id)),
        movies: env
            .movies_sheet
            .or(non_blank(file.sheet.movies))
            .unwrap_or(defaults.movies),
        series: env
            .series_sheet
            .or(non_blank(file.sheet.series))
            .unwrap_or(defaults.series),
    };
    if sheet.id.is_none() {
        warnings.push_with_hint(
            "No spreadsheet configured",
            "Set MARQUEE_SHEET_ID to the id of a sheet shared as \
             \"Anyone with the link can view\"",
        );
    }

    let cache_defaults = CacheConfig::default();
    let ttl = match env.cache_ttl {
        Some(raw) => parse_duration("MARQUEE_CACHE_TTL", &raw)?,
        None => match non_blank(file.cache.ttl) {
            Some(raw) => parse_duration("[cache].ttl", &raw)?,
            None => cache_defaults.ttl,
        },
    };
    let cache = CacheConfig {
        dir: env.cache_dir.or(file.cache.dir).unwrap_or(cache_defaults.dir),
        ttl,
    };

    let batch_size = match env.batch_size {
        Some(raw) => parse_batch_size(&raw)?,
        None => match file.enrichment.batch_size {
            Some(0) => {
                return Err(ConfigLoadError::InvalidBatchSize {
                    value: "0".to_string(),
                });
            }
            Some(size) => size,
            None => DEFAULT_BATCH_SIZE,
        },
    };

    Ok(ConfigLoad {
        config: AppConfig {
            tmdb,
            sheet,
            cache,
            enrichment: EnrichmentConfig { batch_size },
            metadata: ConfigMetadata {
                config_path,
                env_file_loaded: false,
            },
        },
        warnings,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_duration(
    field: &'static str,
    raw: &str,
) -> Result<Duration, ConfigLoadError> {
    humantime::parse_duration(raw).map_err(|source| {
        ConfigLoadError::InvalidDuration {
            field,
            value: raw.to_string(),
            source,
        }
    })
}

fn parse_batch_size(raw: &str) -> Result<usize, ConfigLoadError> {
    match raw.parse::<usize>() {
        Ok(size) if size >= 1 => Ok(size),
        _ => Err(ConfigLoadError::InvalidBatchSize {
            value: raw.to_string(),
        }),
    }
}
