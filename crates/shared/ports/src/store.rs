use async_trait::async_trait;
use std::time::Duration;
use swapstats_core::{BucketKey, Stats};
use thiserror::Error;

/// Errors surfaced by a counter store
///
/// Missing keys are never an error: the read contract resolves absence to
/// zero. The only failure class is the store being unreachable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("counter store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Port for the per-bucket counter store.
///
/// The store owns bucket expiry: a bucket whose TTL has elapsed must read as
/// zero without any action from the caller. Implementations must make `add`
/// atomic per bucket key so concurrent writers never lose updates.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Atomically add `amount` to the bucket's volume and 1 to its
    /// transaction count, (re)setting the bucket's expiry to `ttl` from now.
    ///
    /// Returns the bucket's own totals after the write (the bucket
    /// snapshot). Refreshing the TTL on every write is safe because the key
    /// pins a fixed bucket start; once real time passes that slot, writes
    /// land in a new key.
    async fn add(&self, key: &BucketKey, amount: f64, ttl: Duration) -> StoreResult<Stats>;

    /// Read one bucket's totals. A missing or expired bucket reads as zero.
    async fn get(&self, key: &BucketKey) -> StoreResult<Stats>;
}
