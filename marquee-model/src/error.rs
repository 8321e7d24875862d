use std::fmt::{self, Display};

use crate::media_kind::MediaKind;

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    EmptyTitle(MediaKind),
    UnknownMediaKind(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::EmptyTitle(kind) => {
                write!(f, "{kind} record requires a non-empty title")
            }
            ModelError::UnknownMediaKind(raw) => {
                write!(f, "unknown media kind: {raw:?}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
