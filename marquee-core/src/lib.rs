//! # Marquee Core
//!
//! Core library for Marquee, a personal watchlist that reads a spreadsheet
//! of movies and series and enriches every row with TMDB artwork, ratings,
//! synopses and trailers.
//!
//! ## Overview
//!
//! - **Spreadsheet ingestion**: fetch a published Google Sheet as CSV and
//!   normalize its loosely-named columns into [`BaseRecord`]s
//! - **Cache store**: a key-value persistence layer with per-entry expiry and
//!   a separate, non-expiring override namespace
//! - **Metadata resolution**: override, then cache, then a TMDB search
//! - **Trailer resolution**: first YouTube trailer or teaser for a title
//! - **Batched enrichment**: bounded concurrent lookups surfaced batch by batch
//! - **Merge policy**: sheet values win, except ratings and missing imagery
//! - **Catalog**: displayed records plus filter, sort and facet queries
//!
//! ## Architecture
//!
//! - [`infra`]: storage backends, the TMDB provider and the sheet client
//! - [`metadata`]: resolvers and the merge policy
//! - [`enrichment`]: the batch pipeline and its cancellable task form
//! - [`catalog`]: the displayed collection and its queries
//!
//! [`BaseRecord`]: marquee_model::BaseRecord

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod catalog;
pub mod enrichment;
pub mod error;
pub mod infra;
pub mod metadata;

pub use catalog::{Catalog, CatalogLoader, CatalogQuery, Facets, SortOrder};
pub use enrichment::{
    BatchItem, DEFAULT_BATCH_SIZE, EnrichmentBatch, EnrichmentPipeline,
    EnrichmentSummary, EnrichmentTask,
};
pub use error::{MarqueeError, Result};
pub use infra::cache::{
    CacheKey, CacheLookup, CacheStore, DEFAULT_CACHE_TTL, DiskKeyValueStore,
    KeyValueStore, MemoryKeyValueStore, StoreError,
};
pub use infra::media::providers::{
    MetadataProvider, ProviderError, SearchHit, SearchRequest,
    TmdbApiProvider, VideoHit,
};
pub use infra::sheets::{SheetClient, SheetError};
pub use metadata::{MetadataResolver, TrailerResolver, merge};

pub use marquee_model as model;
