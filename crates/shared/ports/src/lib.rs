//! Swapstats Ports
//!
//! Port definitions (traits) for the swap stats aggregation service.
//! These define the boundaries between domain logic and infrastructure.

mod clock;
mod store;

pub use clock::Clock;
pub use store::{CounterStore, StoreError, StoreResult};
