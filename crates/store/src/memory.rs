use async_trait::async_trait;
use chrono::Duration as TimeDelta;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use swapstats_core::{BucketKey, Stats, Timestamp};
use swapstats_ports::{Clock, CounterStore, StoreResult};

/// One bucket's accumulators plus its expiry deadline
#[derive(Debug, Clone, Copy)]
struct BucketSlot {
    volume: f64,
    tx_count: u64,
    expires_at: Timestamp,
}

impl BucketSlot {
    fn empty(expires_at: Timestamp) -> Self {
        Self {
            volume: 0.0,
            tx_count: 0,
            expires_at,
        }
    }

    fn stats(&self) -> Stats {
        Stats::new(self.volume, self.tx_count)
    }
}

/// In-process counter store: `BucketKey -> BucketSlot` arena.
///
/// The dashmap shards the key space, so a write takes only its shard's lock
/// and the entry guard makes each read-modify-write atomic per key.
///
/// Expiry is logical first, physical second: reads treat a slot past its
/// deadline as absent, so correctness never depends on [`purge_expired`]
/// running. The purge only bounds memory.
///
/// [`purge_expired`]: MemoryCounterStore::purge_expired
pub struct MemoryCounterStore {
    buckets: DashMap<BucketKey, BucketSlot>,
    clock: Arc<dyn Clock>,
}

impl MemoryCounterStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            buckets: DashMap::new(),
            clock,
        }
    }

    /// Number of live slots, expired ones included until swept
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Drop every slot whose TTL has elapsed; returns how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.buckets.len();
        self.buckets.retain(|_, slot| slot.expires_at > now);
        let removed = before.saturating_sub(self.buckets.len());
        if removed > 0 {
            log::debug!("purged {} expired bucket(s)", removed);
        }
        removed
    }

    fn deadline(&self, now: Timestamp, ttl: Duration) -> Timestamp {
        now + TimeDelta::seconds(ttl.as_secs() as i64)
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn add(&self, key: &BucketKey, amount: f64, ttl: Duration) -> StoreResult<Stats> {
        let now = self.clock.now();
        let expires_at = self.deadline(now, ttl);

        let mut slot = self
            .buckets
            .entry(key.clone())
            .or_insert_with(|| BucketSlot::empty(expires_at));

        // A dead slot the sweeper hasn't reached yet must not leak its
        // totals into the new lifetime of the same key.
        if slot.expires_at <= now {
            *slot = BucketSlot::empty(expires_at);
        }

        slot.volume += amount;
        slot.tx_count += 1;
        slot.expires_at = expires_at;

        Ok(slot.stats())
    }

    async fn get(&self, key: &BucketKey) -> StoreResult<Stats> {
        let now = self.clock.now();
        match self.buckets.get(key) {
            Some(slot) if slot.expires_at > now => Ok(slot.stats()),
            _ => Ok(Stats::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use swapstats_clock::ManualClock;
    use swapstats_core::Window;

    fn fixture() -> (Arc<ManualClock>, MemoryCounterStore) {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let store = MemoryCounterStore::new(clock.clone());
        (clock, store)
    }

    fn key(entity: &str) -> BucketKey {
        BucketKey::new(entity, Window::FiveMin, 1_740_830_400)
    }

    const TTL: Duration = Duration::from_secs(300);

    #[tokio::test]
    async fn test_add_returns_running_bucket_totals() {
        let (_clock, store) = fixture();

        let first = store.add(&key("ETH"), 100.0, TTL).await.unwrap();
        assert_eq!(first, Stats::new(100.0, 1));

        let second = store.add(&key("ETH"), 50.0, TTL).await.unwrap();
        assert_eq!(second, Stats::new(150.0, 2));
    }

    #[tokio::test]
    async fn test_missing_bucket_reads_zero() {
        let (_clock, store) = fixture();
        let stats = store.get(&key("ETH")).await.unwrap();
        assert!(stats.is_zero());
    }

    #[tokio::test]
    async fn test_expired_bucket_reads_zero() {
        let (clock, store) = fixture();
        store.add(&key("ETH"), 100.0, TTL).await.unwrap();

        clock.advance(TimeDelta::seconds(301));

        let stats = store.get(&key("ETH")).await.unwrap();
        assert!(stats.is_zero());
    }

    #[tokio::test]
    async fn test_write_refreshes_ttl() {
        let (clock, store) = fixture();
        store.add(&key("ETH"), 100.0, TTL).await.unwrap();

        // Second write two minutes later pushes the deadline out
        clock.advance(TimeDelta::seconds(120));
        store.add(&key("ETH"), 50.0, TTL).await.unwrap();

        clock.advance(TimeDelta::seconds(250));
        let stats = store.get(&key("ETH")).await.unwrap();
        assert_eq!(stats, Stats::new(150.0, 2));
    }

    #[tokio::test]
    async fn test_write_to_dead_slot_starts_fresh() {
        let (clock, store) = fixture();
        store.add(&key("ETH"), 100.0, TTL).await.unwrap();

        clock.advance(TimeDelta::seconds(301));

        // Same key, new lifetime: the old totals must not resurface
        let stats = store.add(&key("ETH"), 25.0, TTL).await.unwrap();
        assert_eq!(stats, Stats::new(25.0, 1));
    }

    #[tokio::test]
    async fn test_purge_removes_only_dead_slots() {
        let (clock, store) = fixture();
        store.add(&key("ETH"), 100.0, TTL).await.unwrap();
        store
            .add(&key("BTC"), 10.0, Duration::from_secs(3600))
            .await
            .unwrap();

        clock.advance(TimeDelta::seconds(301));

        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.get(&key("BTC")).await.unwrap().tx_count == 1);
    }

    #[tokio::test]
    async fn test_concurrent_adds_lose_no_updates() {
        let (_clock, store) = fixture();
        let store = Arc::new(store);

        let mut handles = Vec::new();
        for _ in 0..100 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.add(&key("ETH"), 1.0, TTL).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let stats = store.get(&key("ETH")).await.unwrap();
        assert_eq!(stats.tx_count, 100);
        assert_eq!(stats.volume, 100.0);
    }
}
