use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;

use crate::app::{Result, TouchlineError};
use crate::pubsub::{Consumer, Message, Producer};

/// In-process bus: a linked producer/consumer pair over an unbounded
/// channel. Stands in for an external broker behind the same contracts.
pub fn memory_bus() -> (MemoryProducer, MemoryConsumer) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        MemoryProducer { tx },
        MemoryConsumer {
            rx: Mutex::new(rx),
        },
    )
}

#[derive(Clone)]
pub struct MemoryProducer {
    tx: mpsc::UnboundedSender<Message>,
}

#[async_trait]
impl Producer for MemoryProducer {
    async fn produce(&self, message: Message) -> Result<()> {
        self.tx
            .send(message)
            .map_err(|_| TouchlineError::Bus("consumer side is closed".into()))
    }
}

pub struct MemoryConsumer {
    rx: Mutex<mpsc::UnboundedReceiver<Message>>,
}

#[async_trait]
impl Consumer for MemoryConsumer {
    async fn read(
        &self,
        token: CancellationToken,
        messages: mpsc::Sender<Message>,
        _errors: mpsc::Sender<TouchlineError>,
    ) {
        let mut rx = self.rx.lock().await;

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                message = rx.recv() => match message {
                    Some(message) => {
                        if messages.send(message).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                },
            }
        }
    }
}
