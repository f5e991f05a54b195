use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use futures::Stream;
use tokio::sync::mpsc;

/// Fan-in for a dynamic set of concurrent producers.
///
/// Every producer handed out by [`CompletionBarrier::producer`] reports at most
/// one value. A producer is done once it completes or is dropped, so a task
/// that returns early or panics never blocks the consumer. The stream returned
/// by [`CompletionBarrier::into_stream`] yields values in completion order and
/// ends when every producer is done.
pub struct CompletionBarrier<T> {
    sender: mpsc::UnboundedSender<T>,
    receiver: mpsc::UnboundedReceiver<T>,
    outstanding: Arc<AtomicUsize>,
}

pub struct Producer<T> {
    sender: mpsc::UnboundedSender<T>,
    outstanding: Arc<AtomicUsize>,
}

impl<T> CompletionBarrier<T> {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver,
            outstanding: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn producer(&self) -> Producer<T> {
        self.outstanding.fetch_add(1, Ordering::AcqRel);
        Producer {
            sender: self.sender.clone(),
            outstanding: Arc::clone(&self.outstanding),
        }
    }

    /// Producers that have not reported yet.
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }

    pub fn into_stream(self) -> impl Stream<Item = T> {
        let CompletionBarrier { receiver, .. } = self;

        // The barrier's own sender is dropped here, the channel closes with the
        // last producer.
        futures::stream::unfold(receiver, |mut receiver| async move {
            receiver.recv().await.map(|value| (value, receiver))
        })
    }
}

impl<T> Default for CompletionBarrier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Producer<T> {
    pub fn complete(self, value: T) {
        // The consumer only disappears when the whole solve is dropped.
        let _ = self.sender.send(value);
    }

    pub fn discard(self) {}
}

impl<T> Drop for Producer<T> {
    fn drop(&mut self) {
        self.outstanding.fetch_sub(1, Ordering::AcqRel);
    }
}
