//! Ordered fire-and-forget delivery of local mutations.

use std::sync::Arc;

use choreboard_core::gateway::{RemoteGateway, RemoteMutation};
use tokio::sync::mpsc;

/// FIFO queue in front of the gateway.
///
/// Mutations are enqueued synchronously in the order the user made them and
/// a single background task drains the queue, so writes leave in that order.
/// Delivery stays at-most-once with no acknowledgement: the remote may still
/// reorder or drop them, which the protocol accepts.
#[derive(Clone)]
pub struct MutationOutbox {
    tx: mpsc::UnboundedSender<RemoteMutation>,
}

impl MutationOutbox {
    /// Spawns the sender task and returns the enqueue handle.
    pub fn spawn(gateway: Arc<dyn RemoteGateway>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<RemoteMutation>();
        tokio::spawn(async move {
            while let Some(mutation) = rx.recv().await {
                gateway.send_mutation(mutation).await;
            }
        });
        Self { tx }
    }

    /// Queues a write without blocking. A closed channel means the runtime
    /// is shutting down; dropping the write is consistent with best-effort
    /// delivery.
    pub fn enqueue(&self, mutation: RemoteMutation) {
        if self.tx.send(mutation).is_err() {
            tracing::warn!("[MutationOutbox] sender task gone, dropping write");
        }
    }
}
