use std::{ops::Range, sync::Arc};

use futures::future::join_all;
use marquee_model::{BaseRecord, MediaKind, MetadataRecord};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::task::EnrichmentTask;
use crate::metadata::MetadataResolver;

/// Records resolved concurrently per batch; also the cap on in-flight
/// requests to the metadata service for one pipeline.
pub const DEFAULT_BATCH_SIZE: usize = 8;

/// Resolution result for the record at `index` in the input list.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    pub index: usize,
    pub metadata: Option<MetadataRecord>,
}

/// Results for one contiguous group of input records.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentBatch {
    pub kind: MediaKind,
    /// Zero-based position of this batch in the run.
    pub sequence: usize,
    pub items: Vec<BatchItem>,
}

impl EnrichmentBatch {
    /// Input indices covered by this batch.
    pub fn indices(&self) -> Range<usize> {
        match (self.items.first(), self.items.last()) {
            (Some(first), Some(last)) => first.index..last.index + 1,
            _ => 0..0,
        }
    }

    pub fn matched(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.metadata.is_some())
            .count()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentSummary {
    pub batches: usize,
    pub records: usize,
    pub matched: usize,
    pub cancelled: bool,
}

impl EnrichmentSummary {
    pub(crate) fn record(&mut self, batch: &EnrichmentBatch) {
        self.batches += 1;
        self.records += batch.items.len();
        self.matched += batch.matched();
    }
}

/// Resolves records in fixed-size groups, one group at a time.
///
/// Within a group every lookup runs concurrently; the group is awaited in
/// full before its results are published and before the next group starts.
#[derive(Debug, Clone)]
pub struct EnrichmentPipeline {
    resolver: Arc<MetadataResolver>,
    batch_size: usize,
}

impl EnrichmentPipeline {
    pub fn new(resolver: Arc<MetadataResolver>) -> Self {
        Self {
            resolver,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Sizes below one are clamped to one.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn resolver(&self) -> &Arc<MetadataResolver> {
        &self.resolver
    }

    /// Runs the whole list, handing each finished batch to `on_batch`.
    ///
    /// Once `cancel` fires no further batch is delivered. Lookups already in
    /// flight for the current batch run to completion and are dropped.
    pub async fn enrich<F>(
        &self,
        records: &[BaseRecord],
        kind: MediaKind,
        cancel: &CancellationToken,
        mut on_batch: F,
    ) -> EnrichmentSummary
    where
        F: FnMut(EnrichmentBatch),
    {
        let mut summary = EnrichmentSummary::default();

        for (sequence, group) in records.chunks(self.batch_size).enumerate() {
            if cancel.is_cancelled() {
                summary.cancelled = true;
                break;
            }

            let offset = sequence * self.batch_size;
            let batch =
                self.resolve_group(group, offset, sequence, kind).await;

            if cancel.is_cancelled() {
                debug!(%kind, sequence, "enrichment torn down; dropping batch");
                summary.cancelled = true;
                break;
            }

            summary.record(&batch);
            on_batch(batch);
        }

        info!(
            %kind,
            batches = summary.batches,
            matched = summary.matched,
            cancelled = summary.cancelled,
            "enrichment finished"
        );
        summary
    }

    /// Starts the pipeline on the runtime and returns a handle yielding its
    /// batches.
    pub fn spawn(
        &self,
        records: Vec<BaseRecord>,
        kind: MediaKind,
    ) -> EnrichmentTask {
        EnrichmentTask::spawn(self.clone(), records, kind)
    }

    pub(crate) async fn resolve_group(
        &self,
        group: &[BaseRecord],
        offset: usize,
        sequence: usize,
        kind: MediaKind,
    ) -> EnrichmentBatch {
        let lookups = group.iter().map(|record| {
            self.resolver
                .resolve(&record.title, record.year.as_deref(), kind)
        });
        let results = join_all(lookups).await;

        EnrichmentBatch {
            kind,
            sequence,
            items: results
                .into_iter()
                .enumerate()
                .map(|(i, metadata)| BatchItem {
                    index: offset + i,
                    metadata,
                })
                .collect(),
        }
    }
}
