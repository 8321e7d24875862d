//! Core data model definitions shared across Marquee crates.
#![allow(missing_docs)]

pub mod error;
pub mod image;
pub mod media_kind;
pub mod records;

pub use error::{ModelError, Result as ModelResult};
pub use image::{BackdropSize, ImageSize, PosterSize, TMDB_IMAGE_BASE};
pub use media_kind::MediaKind;
pub use records::{
    BaseRecord, MergedRecord, MetadataRecord, VideoKey, non_empty,
};
