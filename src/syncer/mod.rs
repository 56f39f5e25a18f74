//! The scheduled half of the sync: fetch the listing, wrap it in an
//! envelope, publish it on the bus. Publishing never waits on
//! persistence; the subscriber side picks the batch up independently.

pub mod ingest;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::app::Result;
use crate::client::Client;
use crate::domain::{Article, ItemStub};
use crate::feed;
use crate::pubsub::{Message, Producer};

/// Payload kinds carried inside an envelope, decoded exactly once at
/// the subscriber boundary.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyncEvent {
    Listing { items: Vec<ItemStub> },
    Article { article: Article },
}

#[async_trait]
pub trait Syncer: Send + Sync {
    /// Run one sync cycle. Any error aborts the cycle; the scheduler
    /// retries on its next tick.
    async fn sync(&self, token: &CancellationToken) -> Result<()>;
}

pub struct NewsSyncer {
    client: Arc<dyn Client>,
    producer: Arc<dyn Producer>,
    url: String,
}

impl NewsSyncer {
    pub fn new(client: Arc<dyn Client>, producer: Arc<dyn Producer>, url: String) -> Self {
        Self {
            client,
            producer,
            url,
        }
    }
}

#[async_trait]
impl Syncer for NewsSyncer {
    async fn sync(&self, token: &CancellationToken) -> Result<()> {
        let listing = feed::fetch_listing(self.client.as_ref(), token, &self.url).await?;
        info!(
            club = %listing.club_name,
            items = listing.items.len(),
            "publishing news listing"
        );

        let event = SyncEvent::Listing {
            items: listing.items,
        };
        let message = Message::new(serde_json::to_vec(&event)?);
        self.producer.produce(message).await?;

        Ok(())
    }
}
