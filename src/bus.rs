// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event Bus: in-process pub/sub fanning [`BusEvent`]s out to every
//! subscriber, with back-pressure-aware delivery.
//!
//! Subscribers are tracked by an integer id in an arena-style registry
//! rather than a strong reference cycle: the bus owns a map from id to
//! delivery queue, and a subscriber holds only its id plus a handle to
//! request unsubscribe. Neither side needs a reference back into the
//! other's internals.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::debug;

use crate::event::{AgentStatus, BusEvent, Message};

/// Bound on each subscriber's delivery queue. A subscriber that falls this
/// far behind is disconnected rather than allowed to stall the publisher.
const QUEUE_CAPACITY: usize = 256;

/// Snapshot of process-scoped state handed to a newly subscribed client so
/// it can bootstrap without a separate fetch.
pub struct Bootstrap {
    pub messages: Vec<Message>,
    pub status: AgentStatus,
}

struct Subscriber {
    tx: mpsc::Sender<BusEvent>,
}

/// Fan-out registry. Cheap to clone (wraps an `Arc`); share one instance
/// across the snapshot loop and every HTTP handler.
#[derive(Clone)]
pub struct Bus {
    inner: Arc<Inner>,
}

struct Inner {
    subscribers: Mutex<HashMap<u64, Subscriber>>,
    next_id: AtomicU64,
}

/// A receiver-side subscription. Dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    bus: Bus,
    rx: mpsc::Receiver<BusEvent>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub async fn recv(&mut self) -> Option<BusEvent> {
        self.rx.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.id);
    }
}

impl Bus {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner { subscribers: Mutex::new(HashMap::new()), next_id: AtomicU64::new(1) }),
        }
    }

    /// Register a new subscriber and seed it with the bootstrap events
    /// (one `message_update` per existing message, then the current
    /// `status_change`) before any newly published event can reach it.
    pub fn subscribe(&self, bootstrap: Bootstrap) -> Subscription {
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);

        for message in bootstrap.messages {
            // The channel was just created with spare capacity; bootstrap
            // delivery cannot overflow unless the transcript exceeds the
            // queue bound, in which case the newest bootstrap events win.
            let _ = tx.try_send(BusEvent::MessageUpdate(message));
        }
        let _ = tx.try_send(BusEvent::StatusChange(bootstrap.status));

        self.inner.subscribers.lock().insert(id, Subscriber { tx });
        Subscription { id, bus: self.clone(), rx }
    }

    /// Remove a subscriber. Safe to call more than once and safe to call
    /// from within that subscriber's own delivery path.
    pub fn unsubscribe(&self, id: u64) {
        self.inner.subscribers.lock().remove(&id);
    }

    /// Publish an event to every current subscriber. Iterates a snapshot of
    /// the registry taken under the lock, then releases the lock before any
    /// delivery attempt so a slow or closed subscriber cannot block others.
    pub fn publish(&self, event: BusEvent) {
        let snapshot: Vec<(u64, mpsc::Sender<BusEvent>)> = {
            let subscribers = self.inner.subscribers.lock();
            subscribers.iter().map(|(id, sub)| (*id, sub.tx.clone())).collect()
        };

        for (id, tx) in snapshot {
            match tx.try_send(event.clone()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    debug!(subscriber = id, "event bus queue overflow, disconnecting subscriber");
                    self.unsubscribe(id);
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    self.unsubscribe(id);
                }
            }
        }
    }

    /// Number of currently registered subscribers. For diagnostics only.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().len()
    }

    /// Drop every subscriber's delivery sender, ending their streams once
    /// their already-queued events (e.g. a final `status_change`) drain.
    /// Used on session termination to close all SSE connections.
    pub fn close_all(&self) {
        self.inner.subscribers.lock().clear();
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
