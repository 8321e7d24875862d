//! The displayed collection: one list of merged records per media kind.

pub mod loader;
pub mod query;

use marquee_model::{BaseRecord, MediaKind, MergedRecord, MetadataRecord};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::enrichment::{EnrichmentBatch, EnrichmentPipeline, EnrichmentSummary};
use crate::metadata::merge;

pub use loader::CatalogLoader;
pub use query::{CatalogQuery, Facets, SortOrder};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    movies: Vec<MergedRecord>,
    series: Vec<MergedRecord>,
}

impl Catalog {
    /// Builds an un-enriched catalog; it is displayable immediately.
    pub fn new(movies: Vec<BaseRecord>, series: Vec<BaseRecord>) -> Self {
        Self {
            movies: movies.into_iter().map(MergedRecord::from).collect(),
            series: series.into_iter().map(MergedRecord::from).collect(),
        }
    }

    pub fn records(&self, kind: MediaKind) -> &[MergedRecord] {
        match kind {
            MediaKind::Movie => &self.movies,
            MediaKind::Series => &self.series,
        }
    }

    fn records_mut(&mut self, kind: MediaKind) -> &mut Vec<MergedRecord> {
        match kind {
            MediaKind::Movie => &mut self.movies,
            MediaKind::Series => &mut self.series,
        }
    }

    /// Sheet rows of one kind, in sheet order.
    pub fn base_records(&self, kind: MediaKind) -> Vec<BaseRecord> {
        self.records(kind)
            .iter()
            .map(|merged| merged.record.clone())
            .collect()
    }

    pub fn len(&self, kind: MediaKind) -> usize {
        self.records(kind).len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty() && self.series.is_empty()
    }

    /// Merges one enrichment batch into the list it belongs to.
    ///
    /// Items without a match leave their record untouched; indices outside
    /// the list are ignored. Returns the number of records updated.
    pub fn apply_batch(&mut self, batch: &EnrichmentBatch) -> usize {
        let records = self.records_mut(batch.kind);
        let mut updated = 0;

        for item in &batch.items {
            let Some(meta) = item.metadata.as_ref() else {
                continue;
            };
            let Some(existing) = records.get_mut(item.index) else {
                debug!(
                    index = item.index,
                    kind = %batch.kind,
                    "batch index out of range"
                );
                continue;
            };
            *existing = merge(&existing.record, Some(meta));
            updated += 1;
        }

        updated
    }

    /// Applies a manual correction to every record with this exact title and
    /// year. Returns the number of records updated.
    pub fn apply_override(
        &mut self,
        kind: MediaKind,
        title: &str,
        year: Option<&str>,
        meta: &MetadataRecord,
    ) -> usize {
        let mut updated = 0;
        for record in self.records_mut(kind).iter_mut().filter(|r| {
            r.record.title == title && r.record.year.as_deref() == year
        }) {
            record.apply_override(meta);
            updated += 1;
        }
        updated
    }

    /// Enriches both lists concurrently, applying batches as they land.
    ///
    /// `on_batch` observes every applied batch (after it has been merged).
    /// Cancelling `cancel` stops both pipelines; batches that arrive
    /// afterwards are discarded.
    pub async fn enrich<F>(
        &mut self,
        pipeline: &EnrichmentPipeline,
        cancel: &CancellationToken,
        mut on_batch: F,
    ) -> [EnrichmentSummary; 2]
    where
        F: FnMut(&EnrichmentBatch, &Catalog),
    {
        let mut movies = pipeline
            .spawn(self.base_records(MediaKind::Movie), MediaKind::Movie);
        let mut series = pipeline
            .spawn(self.base_records(MediaKind::Series), MediaKind::Series);
        let mut movies_open = true;
        let mut series_open = true;

        while movies_open || series_open {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                batch = movies.next_batch(), if movies_open => {
                    if batch.is_none() { movies_open = false; }
                    batch
                }
                batch = series.next_batch(), if series_open => {
                    if batch.is_none() { series_open = false; }
                    batch
                }
            };

            if let Some(batch) = next {
                if cancel.is_cancelled() {
                    break;
                }
                self.apply_batch(&batch);
                on_batch(&batch, self);
            }
        }

        if cancel.is_cancelled() {
            movies.cancel();
            series.cancel();
        }

        let (movies, series) = tokio::join!(movies.join(), series.join());
        [movies, series]
    }
}
