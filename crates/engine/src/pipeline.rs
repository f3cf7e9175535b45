use crate::engine::StatsEngine;
use crate::error::EngineError;
use std::sync::Arc;
use swapstats_core::{Entity, StatsUpdate, SwapEvent};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors surfaced while processing one swap event
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to update stats for {entity}: {source}")]
    Stats {
        entity: String,
        #[source]
        source: EngineError,
    },

    #[error("failed to serialize stats update for {entity}: {source}")]
    Serialize {
        entity: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

/// Per-event processing pipeline.
///
/// Each decoded swap event produces three increments in strict order —
/// from-token, to-token, directional pair — and after each increment the
/// resulting snapshot message is handed to the fan-out via the internal
/// update queue.
///
/// The steps are not atomic: a store failure mid-event leaves the earlier
/// increments applied and surfaces the error to the transport, which owns
/// redelivery. Combined with at-least-once delivery this can double-count a
/// redelivered event; events are not deduplicated by tx hash.
pub struct SwapPipeline {
    engine: Arc<StatsEngine>,
    updates_tx: mpsc::Sender<String>,
}

impl SwapPipeline {
    pub fn new(engine: Arc<StatsEngine>, updates_tx: mpsc::Sender<String>) -> Self {
        Self { engine, updates_tx }
    }

    /// Process one decoded event: increment and publish for each of its
    /// three entities. The first failing increment aborts the remaining
    /// steps for this event.
    pub async fn process(&self, event: &SwapEvent) -> PipelineResult<()> {
        for entity in event.entities() {
            self.apply(&entity, event.usd_value).await?;
        }
        Ok(())
    }

    async fn apply(&self, entity: &Entity, amount: f64) -> PipelineResult<()> {
        let snapshots =
            self.engine
                .increment(entity, amount)
                .await
                .map_err(|source| PipelineError::Stats {
                    entity: entity.id(),
                    source,
                })?;

        let update = StatsUpdate::from_snapshots(entity, &snapshots);
        let payload =
            serde_json::to_string(&update).map_err(|source| PipelineError::Serialize {
                entity: entity.id(),
                source,
            })?;

        // The fan-out side going away (shutdown) must not fail ingestion.
        if self.updates_tx.send(payload).await.is_err() {
            log::warn!("update queue closed; dropping stats update for {}", entity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use swapstats_clock::ManualClock;
    use swapstats_core::{BucketKey, Stats, Window};
    use swapstats_ports::{CounterStore, StoreError, StoreResult};
    use swapstats_store::MemoryCounterStore;

    fn sample_event() -> SwapEvent {
        SwapEvent {
            tx_hash: "deadbeef".to_string(),
            token_from: "ETH".to_string(),
            token_to: "USDT".to_string(),
            amount_from: 2.0,
            amount_to: 8400.0,
            usd_value: 8400.0,
            timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    fn fixture() -> (Arc<MemoryCounterStore>, Arc<StatsEngine>) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        ));
        let store = Arc::new(MemoryCounterStore::new(clock.clone()));
        let engine = Arc::new(StatsEngine::new(store.clone(), clock));
        (store, engine)
    }

    #[tokio::test]
    async fn test_event_publishes_three_updates_in_order() {
        let (_store, engine) = fixture();
        let (updates_tx, mut updates_rx) = mpsc::channel(16);
        let pipeline = SwapPipeline::new(engine, updates_tx);

        pipeline.process(&sample_event()).await.unwrap();

        let mut published = Vec::new();
        while let Ok(payload) = updates_rx.try_recv() {
            published.push(payload);
        }
        assert_eq!(published.len(), 3);
        assert!(published[0].contains("\"ETH:5min\""));
        assert!(published[1].contains("\"USDT:5min\""));
        assert!(published[2].contains("\"ETH-USDT:5min\""));
    }

    #[tokio::test]
    async fn test_pair_key_keeps_event_order() {
        let (_store, engine) = fixture();
        let (updates_tx, _updates_rx) = mpsc::channel(16);
        let pipeline = SwapPipeline::new(engine.clone(), updates_tx);

        let mut event = sample_event();
        event.token_from = "USDT".to_string();
        event.token_to = "ETH".to_string();
        pipeline.process(&event).await.unwrap();

        let stats = engine
            .query(&Entity::pair("USDT", "ETH"), Window::FiveMin)
            .await
            .unwrap();
        assert_eq!(stats.tx_count, 1);

        let reversed = engine
            .query(&Entity::pair("ETH", "USDT"), Window::FiveMin)
            .await
            .unwrap();
        assert!(reversed.is_zero());
    }

    /// Store stub that starts failing after a fixed number of `add` calls
    struct FlakyStore {
        inner: Arc<MemoryCounterStore>,
        calls: AtomicUsize,
        fail_from: usize,
    }

    #[async_trait]
    impl CounterStore for FlakyStore {
        async fn add(&self, key: &BucketKey, amount: f64, ttl: Duration) -> StoreResult<Stats> {
            if self.calls.fetch_add(1, Ordering::SeqCst) >= self.fail_from {
                return Err(StoreError::Unavailable("injected outage".to_string()));
            }
            self.inner.add(key, amount, ttl).await
        }

        async fn get(&self, key: &BucketKey) -> StoreResult<Stats> {
            self.inner.get(key).await
        }
    }

    #[tokio::test]
    async fn test_partial_application_on_mid_event_failure() {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        ));
        let memory = Arc::new(MemoryCounterStore::new(clock.clone()));
        // Fail once the first entity's three window writes are done, i.e.
        // on the second entity of the event.
        let flaky = Arc::new(FlakyStore {
            inner: memory.clone(),
            calls: AtomicUsize::new(0),
            fail_from: 3,
        });
        let engine = Arc::new(StatsEngine::new(flaky, clock.clone()));
        let (updates_tx, mut updates_rx) = mpsc::channel(16);
        let pipeline = SwapPipeline::new(engine.clone(), updates_tx);

        let err = pipeline.process(&sample_event()).await.unwrap_err();
        assert!(matches!(err, PipelineError::Stats { ref entity, .. } if entity == "USDT"));

        // The from-token increment stays applied and queryable
        let eth = engine
            .query(&Entity::token("ETH"), Window::FiveMin)
            .await
            .unwrap();
        assert_eq!(eth, Stats::new(8400.0, 1));

        // Only the first entity's update was published
        assert!(updates_rx.try_recv().is_ok());
        assert!(updates_rx.try_recv().is_err());
    }
}
