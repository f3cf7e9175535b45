//! Swapstats Engine
//!
//! The windowed aggregation core of the service:
//!
//! - [`StatsEngine`] — time-bucketed counters per (entity, window, bucket):
//!   O(1) amortized writes (one bucket per window), O(k) bounded reads
//! - [`SwapPipeline`] — per-event orchestration: three increments
//!   (from-token, to-token, pair) each followed by a published snapshot
//! - [`QueryService`] — synchronous read path for an external API surface

mod engine;
mod error;
mod pipeline;
mod query;

pub use engine::{StatsEngine, WindowSnapshots};
pub use error::{EngineError, EngineResult};
pub use pipeline::{PipelineError, PipelineResult, SwapPipeline};
pub use query::QueryService;
