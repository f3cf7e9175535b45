use crate::sink::SubscriberSink;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// Identifier assigned to a subscriber connection on registration
pub type SubscriberId = Uuid;

/// Result of one publish call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishOutcome {
    /// Subscribers the message reached
    pub delivered: usize,
    /// Subscribers evicted because their delivery attempt failed
    pub evicted: usize,
}

/// Registry of live subscriber connections.
///
/// A single mutex guards the set; every operation is O(subscriber count),
/// which is expected to stay small-to-moderate. All publishes flow from one
/// fan-out worker draining one queue, so every subscriber observes messages
/// in publish order.
///
/// Delivery attempts run sequentially under the lock. Each connection's
/// buffering is the bounded channel behind its sink, drained by that
/// connection's own writer task, so one slow socket cannot stall the loop —
/// a subscriber that stops draining fills its channel and is evicted.
pub struct SubscriberHub {
    subscribers: Mutex<HashMap<SubscriberId, Box<dyn SubscriberSink>>>,
}

impl SubscriberHub {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(HashMap::new()),
        }
    }

    /// Add a connection; returns the id used to unregister it later
    pub fn register(&self, sink: Box<dyn SubscriberSink>) -> SubscriberId {
        let id = Uuid::new_v4();
        let mut subscribers = self.subscribers.lock().unwrap();
        subscribers.insert(id, sink);
        log::info!("subscriber {} connected, total: {}", id, subscribers.len());
        id
    }

    /// Remove a connection; true if it was still registered
    pub fn unregister(&self, id: SubscriberId) -> bool {
        let mut subscribers = self.subscribers.lock().unwrap();
        let removed = subscribers.remove(&id).is_some();
        if removed {
            log::info!(
                "subscriber {} disconnected, total: {}",
                id,
                subscribers.len()
            );
        }
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }

    /// Attempt to deliver `payload` to every registered subscriber.
    ///
    /// Failures are collected into a side list and evicted after the
    /// delivery loop completes; the registry is never mutated while being
    /// iterated. A failed subscriber never surfaces as an error to the
    /// publisher.
    pub fn publish(&self, payload: &str) -> PublishOutcome {
        let mut subscribers = self.subscribers.lock().unwrap();

        let mut delivered = 0;
        let mut failed: Vec<SubscriberId> = Vec::new();
        for (id, sink) in subscribers.iter() {
            match sink.deliver(payload) {
                Ok(()) => delivered += 1,
                Err(err) => {
                    log::warn!("evicting subscriber {}: {}", id, err);
                    failed.push(*id);
                }
            }
        }

        for id in &failed {
            subscribers.remove(id);
        }

        PublishOutcome {
            delivered,
            evicted: failed.len(),
        }
    }
}

impl Default for SubscriberHub {
    fn default() -> Self {
        Self::new()
    }
}
