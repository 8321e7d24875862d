//! Incremental enrichment of sheet records with TMDB metadata.

pub mod pipeline;
pub mod task;

pub use pipeline::{
    BatchItem, DEFAULT_BATCH_SIZE, EnrichmentBatch, EnrichmentPipeline,
    EnrichmentSummary,
};
pub use task::EnrichmentTask;
