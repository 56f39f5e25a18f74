//! Message bus plumbing: the envelope, producer/consumer contracts,
//! and the subscriber loop that drives a handler until cancelled.

pub mod memory;
pub mod message;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::app::{Result, TouchlineError};

pub use memory::{memory_bus, MemoryConsumer, MemoryProducer};
pub use message::Message;

const CHANNEL_CAPACITY: usize = 16;

#[async_trait]
pub trait Producer: Send + Sync {
    async fn produce(&self, message: Message) -> Result<()>;
}

/// Drives the underlying bus, forwarding messages and errors onto the
/// given channels until cancelled or the bus closes.
#[async_trait]
pub trait Consumer: Send + Sync {
    async fn read(
        &self,
        token: CancellationToken,
        messages: mpsc::Sender<Message>,
        errors: mpsc::Sender<TouchlineError>,
    );
}

/// Callback invoked once per received message.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, message: Message) -> Result<()>;
}

/// Long-running consumer loop. Waits on the message and error channels
/// fed by the bus consumer; dispatches each message to the handler,
/// logging handler and bus errors without stopping. Exits when the
/// token is cancelled or the consumer ends.
pub struct Subscriber {
    consumer: Arc<dyn Consumer>,
}

impl Subscriber {
    pub fn new(consumer: Arc<dyn Consumer>) -> Self {
        Self { consumer }
    }

    pub async fn run(&self, token: CancellationToken, handler: Arc<dyn Handler>) {
        let (msg_tx, mut msg_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (err_tx, mut err_rx) = mpsc::channel(CHANNEL_CAPACITY);

        let consumer = self.consumer.clone();
        let consumer_token = token.clone();
        tokio::spawn(async move {
            consumer.read(consumer_token, msg_tx, err_tx).await;
        });

        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("subscriber loop cancelled");
                    break;
                }
                message = msg_rx.recv() => match message {
                    Some(message) => {
                        if let Err(e) = handler.handle(message).await {
                            warn!(error = %e, "subscriber callback failed");
                        }
                    }
                    // Bus consumer gone and every delivered message drained.
                    None => break,
                },
                Some(e) = err_rx.recv() => warn!(error = %e, "bus consumer error"),
            }
        }
    }
}
