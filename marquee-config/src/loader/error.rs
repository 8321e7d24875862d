use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid duration '{value}' for {field}")]
    InvalidDuration {
        field: &'static str,
        value: String,
        #[source]
        source: humantime::DurationError,
    },
    #[error(
        "invalid batch size '{value}': expected a whole number of at least 1"
    )]
    InvalidBatchSize { value: String },
    #[error("no spreadsheet configured; set MARQUEE_SHEET_ID or [sheet].id")]
    MissingSheetId,
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}
