use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Raw configuration as written in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub tmdb: FileTmdbConfig,
    #[serde(default)]
    pub sheet: FileSheetConfig,
    #[serde(default)]
    pub cache: FileCacheConfig,
    #[serde(default)]
    pub enrichment: FileEnrichmentConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileTmdbConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileSheetConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCacheConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Humantime duration, e.g. `"7d"` or `"12h"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileEnrichmentConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<usize>,
}

/// Environment-derived configuration values, unparsed where parsing can
/// fail so the loader can report the offending variable.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub tmdb_api_key: Option<String>,
    pub tmdb_language: Option<String>,
    pub sheet_id: Option<String>,
    pub movies_sheet: Option<String>,
    pub series_sheet: Option<String>,
    pub cache_dir: Option<PathBuf>,
    pub cache_ttl: Option<String>,
    pub batch_size: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the environment layer from any variable source. Blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            config_path: var("MARQUEE_CONFIG").map(PathBuf::from),
            tmdb_api_key: var("TMDB_API_KEY")
                .or_else(|| var("VITE_TMDB_API_KEY")),
            tmdb_language: var("TMDB_LANG"),
            sheet_id: var("MARQUEE_SHEET_ID"),
            movies_sheet: var("MARQUEE_MOVIES_SHEET"),
            series_sheet: var("MARQUEE_SERIES_SHEET"),
            cache_dir: var("MARQUEE_CACHE_DIR").map(PathBuf::from),
            cache_ttl: var("MARQUEE_CACHE_TTL"),
            batch_size: var("MARQUEE_BATCH_SIZE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> EnvConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn blank_values_are_unset() {
        let vars = env(&[("TMDB_API_KEY", "  "), ("MARQUEE_SHEET_ID", "abc")]);
        assert_eq!(vars.tmdb_api_key, None);
        assert_eq!(vars.sheet_id.as_deref(), Some("abc"));
    }

    #[test]
    fn vite_key_is_a_fallback() {
        let legacy = env(&[("VITE_TMDB_API_KEY", "legacy")]);
        assert_eq!(legacy.tmdb_api_key.as_deref(), Some("legacy"));

        let both = env(&[
            ("VITE_TMDB_API_KEY", "legacy"),
            ("TMDB_API_KEY", "primary"),
        ]);
        assert_eq!(both.tmdb_api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn file_config_parses_sections() {
        let file: FileConfig = toml::from_str(
            r#"
            [sheet]
            id = "151Dfjpit"
            series = "Shows"

            [cache]
            ttl = "12h"
            "#,
        )
        .unwrap();

        assert_eq!(file.sheet.id.as_deref(), Some("151Dfjpit"));
        assert_eq!(file.sheet.movies, None);
        assert_eq!(file.cache.ttl.as_deref(), Some("12h"));
        assert!(file.tmdb.api_key.is_none());
    }
}
