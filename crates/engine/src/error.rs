use swapstats_ports::StoreError;
use thiserror::Error;

/// Errors surfaced by the aggregation engine
///
/// Missing buckets are not errors; the only failure class is the counter
/// store being unreachable.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("counter store error: {0}")]
    Store(#[from] StoreError),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
