//! The concurrent sync pipeline.
//!
//! Three stages joined by channels: a semaphore-bounded fan-out that
//! fetches one detail document per item stub, a single parse task, and
//! a persist task that deduplicates against storage. Every dispatched
//! stub flows through all three stages exactly once (failures travel
//! as placeholders instead of disappearing), so `process` returns once
//! `saved + skipped + failed` equals the number of stubs dispatched,
//! and never hangs on a partially failed batch.

use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::app::TouchlineError;
use crate::client::Client;
use crate::domain::{ArticleDetail, ItemStub};
use crate::feed;
use crate::store::Store;

pub const DEFAULT_WORKERS: usize = 8;

/// Per-batch outcome tally. `total()` always equals the number of
/// stubs handed to [`Pipeline::process`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub saved: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl SyncReport {
    pub fn total(&self) -> usize {
        self.saved + self.skipped + self.failed
    }
}

struct RawDetail {
    stub: ItemStub,
    body: Option<Vec<u8>>,
}

struct ParsedDetail {
    stub: ItemStub,
    detail: Option<ArticleDetail>,
}

pub struct Pipeline {
    store: Arc<dyn Store>,
    client: Arc<dyn Client>,
    detail_url: String,
    semaphore: Arc<Semaphore>,
    workers: usize,
}

impl Pipeline {
    pub fn new(store: Arc<dyn Store>, client: Arc<dyn Client>, detail_url: String) -> Self {
        Self::with_workers(store, client, detail_url, DEFAULT_WORKERS)
    }

    pub fn with_workers(
        store: Arc<dyn Store>,
        client: Arc<dyn Client>,
        detail_url: String,
        workers: usize,
    ) -> Self {
        Self {
            store,
            client,
            detail_url,
            semaphore: Arc::new(Semaphore::new(workers)),
            workers,
        }
    }

    /// Run one batch through fetch, parse and persist. Returns after
    /// every stub is accounted for, whatever its individual outcome.
    pub async fn process(&self, token: &CancellationToken, items: Vec<ItemStub>) -> SyncReport {
        let total = items.len();
        if total == 0 {
            return SyncReport::default();
        }

        let raw_rx = self.spawn_fetch_tasks(token, items);
        let parsed_rx = spawn_parse_stage(raw_rx);
        let report = self.persist(parsed_rx).await;

        info!(
            total,
            saved = report.saved,
            skipped = report.skipped,
            failed = report.failed,
            "sync batch complete"
        );
        report
    }

    /// Fan-out stage: one task per stub, bounded by the worker
    /// semaphore. Each task delivers exactly one record on the returned
    /// channel; a fetch failure becomes an empty placeholder.
    fn spawn_fetch_tasks(
        &self,
        token: &CancellationToken,
        items: Vec<ItemStub>,
    ) -> mpsc::Receiver<RawDetail> {
        let (tx, rx) = mpsc::channel(self.workers.max(1));

        for stub in items {
            let tx = tx.clone();
            let client = self.client.clone();
            let semaphore = self.semaphore.clone();
            let token = token.clone();
            let url = format!("{}?id={}", self.detail_url, stub.id);

            tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");

                let body = match client.get(&token, &url).await {
                    Ok(body) => Some(body),
                    Err(e) => {
                        error!(id = %stub.id, error = %e, "detail fetch failed");
                        None
                    }
                };

                let _ = tx.send(RawDetail { stub, body }).await;
            });
        }

        // The channel closes once the last fetch task drops its sender.
        rx
    }

    /// Persist stage: drains the parse stage until its channel closes.
    /// Only a NotFound lookup authorizes an insert; any other lookup
    /// error skips the insert and counts the item as failed, leaving it
    /// to a later cycle.
    async fn persist(&self, mut parsed_rx: mpsc::Receiver<ParsedDetail>) -> SyncReport {
        let mut report = SyncReport::default();

        while let Some(ParsedDetail { stub, detail }) = parsed_rx.recv().await {
            let Some(detail) = detail else {
                report.failed += 1;
                continue;
            };

            match self.store.find_by_id(&detail.id).await {
                Ok(_) => {
                    debug!(id = %detail.id, "already stored, skipping");
                    report.skipped += 1;
                }
                Err(TouchlineError::NotFound(_)) => {
                    let id = detail.id.clone();
                    match self.store.save(&detail.into_article()).await {
                        Ok(()) => report.saved += 1,
                        Err(e) => {
                            error!(id = %id, error = %e, "failed to save article");
                            report.failed += 1;
                        }
                    }
                }
                Err(e) => {
                    error!(id = %stub.id, error = %e, "lookup failed, not inserting");
                    report.failed += 1;
                }
            }
        }

        report
    }
}

/// Parse stage: a single task consuming raw bodies until the fetch
/// channel closes. Parse failures are logged and forwarded as
/// placeholders; the output channel closes when the input is exhausted.
fn spawn_parse_stage(mut raw_rx: mpsc::Receiver<RawDetail>) -> mpsc::Receiver<ParsedDetail> {
    let (tx, rx) = mpsc::channel(DEFAULT_WORKERS);

    tokio::spawn(async move {
        while let Some(RawDetail { stub, body }) = raw_rx.recv().await {
            let detail = body.and_then(|body| match feed::parse_detail(&body) {
                Ok(detail) => Some(detail),
                Err(e) => {
                    error!(id = %stub.id, error = %e, "detail parse failed");
                    None
                }
            });

            if tx.send(ParsedDetail { stub, detail }).await.is_err() {
                break;
            }
        }
    });

    rx
}
