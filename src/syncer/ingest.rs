use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::app::{Result, TouchlineError};
use crate::pipeline::Pipeline;
use crate::pubsub::{Handler, Message};
use crate::store::Store;
use crate::syncer::SyncEvent;

/// Subscriber-side boundary: decodes each envelope payload once and
/// drives the pipeline (listing batches) or the store (single
/// articles). Blocks the subscriber loop until the batch completes.
pub struct IngestService {
    pipeline: Arc<Pipeline>,
    store: Arc<dyn Store>,
    token: CancellationToken,
}

impl IngestService {
    pub fn new(pipeline: Arc<Pipeline>, store: Arc<dyn Store>, token: CancellationToken) -> Self {
        Self {
            pipeline,
            store,
            token,
        }
    }
}

#[async_trait]
impl Handler for IngestService {
    async fn handle(&self, message: Message) -> Result<()> {
        let event: SyncEvent = serde_json::from_slice(&message.raw_data)?;

        match event {
            SyncEvent::Listing { items } => {
                let report = self.pipeline.process(&self.token, items).await;
                info!(
                    saved = report.saved,
                    skipped = report.skipped,
                    failed = report.failed,
                    "listing batch persisted"
                );
                Ok(())
            }
            SyncEvent::Article { article } => match self.store.find_by_id(&article.id).await {
                Ok(_) => Ok(()),
                Err(TouchlineError::NotFound(_)) => self.store.save(&article).await,
                Err(e) => Err(e),
            },
        }
    }
}
