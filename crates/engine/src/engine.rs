use crate::error::EngineResult;
use std::collections::BTreeMap;
use std::sync::Arc;
use swapstats_core::{BucketKey, Entity, Stats, Window};
use swapstats_ports::{Clock, CounterStore};

/// Per-window bucket snapshots returned by a write
pub type WindowSnapshots = BTreeMap<Window, Stats>;

/// Windowed aggregation engine.
///
/// Writes touch exactly one bucket per window; reads sum a bounded number of
/// buckets (at most 24). Expiry is delegated to the counter store: an
/// expired bucket simply reads as zero, so no background work is required
/// for correctness.
pub struct StatsEngine {
    store: Arc<dyn CounterStore>,
    clock: Arc<dyn Clock>,
}

impl StatsEngine {
    pub fn new(store: Arc<dyn CounterStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Record one swap's USD value against `entity`.
    ///
    /// For each window the engine adds to the current bucket and refreshes
    /// its TTL to the window span. Returns each window's bucket snapshot
    /// (the bucket's own totals, not the whole window). The first store
    /// error aborts the remaining windows and propagates; there is no retry
    /// here.
    pub async fn increment(&self, entity: &Entity, amount: f64) -> EngineResult<WindowSnapshots> {
        let now = self.clock.now();
        let entity_id = entity.id();

        let mut snapshots = WindowSnapshots::new();
        for window in Window::ALL {
            let key = BucketKey::new(entity_id.clone(), window, window.bucket_start(now));
            let bucket = self.store.add(&key, amount, window.span()).await?;
            snapshots.insert(window, bucket);
        }
        Ok(snapshots)
    }

    /// Sum the window's look-back range for `entity`.
    ///
    /// Reads the window's `k` bucket keys walking back one granularity step
    /// at a time; buckets that never existed or have expired contribute
    /// zero. Fails only if the store is unreachable.
    pub async fn query(&self, entity: &Entity, window: Window) -> EngineResult<Stats> {
        let now = self.clock.now();
        let entity_id = entity.id();
        let granularity = window.granularity().as_secs() as i64;
        let newest = window.bucket_start(now);

        let mut total = Stats::default();
        for i in 0..window.bucket_count() as i64 {
            let key = BucketKey::new(entity_id.clone(), window, newest - i * granularity);
            total += self.store.get(&key).await?;
        }
        Ok(total)
    }
}
