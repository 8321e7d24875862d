use thiserror::Error;

use crate::infra::cache::StoreError;
use crate::infra::media::providers::ProviderError;
use crate::infra::sheets::SheetError;

/// Shown next to spreadsheet failures; a private sheet is the usual cause.
pub const SHEET_SHARING_HINT: &str =
    "Make sure your Google Sheet is set to \"Anyone with the link can view\"";

#[derive(Error, Debug)]
pub enum MarqueeError {
    #[error("Failed to load data: {0}")]
    Sheet(#[from] SheetError),

    #[error("Cache error: {0}")]
    Store(#[from] StoreError),

    #[error("Metadata provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Invalid record: {0}")]
    Model(#[from] marquee_model::ModelError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MarqueeError {
    /// Remediation hint for errors the user can fix themselves.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            MarqueeError::Sheet(_) => Some(SHEET_SHARING_HINT),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MarqueeError>;
