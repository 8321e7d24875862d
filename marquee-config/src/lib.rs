//! Configuration for Marquee.
//!
//! Values come from three layers, highest priority first: process
//! environment (optionally seeded from a `.env` file), an optional TOML file,
//! and built-in defaults. [`ConfigLoader`] composes them into an
//! [`AppConfig`] plus any [`ConfigWarnings`] worth surfacing.
#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod sources;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::{
    AppConfig, CacheConfig, ConfigMetadata, EnrichmentConfig, SheetConfig,
    TmdbConfig,
};
pub use sources::{EnvConfig, FileConfig};
pub use validation::{ConfigWarning, ConfigWarnings};
