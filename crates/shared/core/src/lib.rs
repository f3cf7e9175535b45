//! Swapstats Core Domain
//!
//! Pure domain types for the swap stats aggregation service.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod bucket;
pub mod entity;
pub mod event;
pub mod stats;
pub mod update;
pub mod values;
pub mod window;

// Re-export commonly used types at crate root
pub use bucket::BucketKey;
pub use entity::Entity;
pub use event::SwapEvent;
pub use stats::Stats;
pub use update::StatsUpdate;
pub use values::{Symbol, Timestamp};
pub use window::{ParseWindowError, Window};
