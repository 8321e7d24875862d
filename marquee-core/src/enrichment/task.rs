use marquee_model::{BaseRecord, MediaKind};
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::debug;

use super::pipeline::{EnrichmentBatch, EnrichmentPipeline, EnrichmentSummary};

/// A running enrichment pipeline whose batches arrive over a channel.
///
/// The producer only starts resolving the next group once the previous batch
/// has been taken off the channel. Cancelling (or dropping the task) stops
/// delivery: `next_batch` returns `None` from then on, and the producer exits
/// after its in-flight lookups finish.
#[derive(Debug)]
pub struct EnrichmentTask {
    kind: MediaKind,
    receiver: mpsc::Receiver<EnrichmentBatch>,
    cancel: CancellationToken,
    handle: JoinHandle<EnrichmentSummary>,
    _guard: DropGuard,
}

impl EnrichmentTask {
    pub(crate) fn spawn(
        pipeline: EnrichmentPipeline,
        records: Vec<BaseRecord>,
        kind: MediaKind,
    ) -> Self {
        let cancel = CancellationToken::new();
        let (sender, receiver) = mpsc::channel(1);
        let producer =
            produce(pipeline, records, kind, sender, cancel.clone());
        let handle = tokio::spawn(producer);

        Self {
            kind,
            receiver,
            _guard: cancel.clone().drop_guard(),
            cancel,
            handle,
        }
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Next batch in order, or `None` once finished or cancelled.
    pub async fn next_batch(&mut self) -> Option<EnrichmentBatch> {
        if self.cancel.is_cancelled() {
            return None;
        }

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            batch = self.receiver.recv() => {
                batch.filter(|_| !self.cancel.is_cancelled())
            }
        }
    }

    /// Stops consuming and waits for the producer to exit.
    pub async fn join(self) -> EnrichmentSummary {
        let EnrichmentTask {
            receiver,
            handle,
            _guard,
            ..
        } = self;
        drop(receiver);

        let summary = handle.await.unwrap_or_else(|err| {
            debug!(error = %err, "enrichment producer did not finish cleanly");
            EnrichmentSummary {
                cancelled: true,
                ..Default::default()
            }
        });
        drop(_guard);
        summary
    }
}

async fn produce(
    pipeline: EnrichmentPipeline,
    records: Vec<BaseRecord>,
    kind: MediaKind,
    sender: mpsc::Sender<EnrichmentBatch>,
    cancel: CancellationToken,
) -> EnrichmentSummary {
    let batch_size = pipeline.batch_size();
    let mut summary = EnrichmentSummary::default();

    for (sequence, group) in records.chunks(batch_size).enumerate() {
        let permit = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            permit = sender.reserve() => permit.ok(),
        };
        let Some(permit) = permit else {
            summary.cancelled = true;
            break;
        };

        let batch = pipeline
            .resolve_group(group, sequence * batch_size, sequence, kind)
            .await;

        if cancel.is_cancelled() {
            debug!(%kind, sequence, "enrichment cancelled; dropping batch");
            summary.cancelled = true;
            break;
        }

        summary.record(&batch);
        permit.send(batch);
    }

    summary
}
