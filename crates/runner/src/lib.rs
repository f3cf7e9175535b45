//! Swapstats Runner - Service Orchestration
//!
//! Wires the full swap stats service together and runs its workers:
//!
//! - **Bootstrap**: clock, counter store, engine, pipeline, fan-out hub
//! - **Ingest worker**: pulls payloads from the event transport, decodes,
//!   drives the pipeline strictly one event at a time
//! - **Fan-out worker**: drains the internal update queue into the hub
//! - **Subscriber endpoint**: accepts duplex byte-stream connections and
//!   streams newline-delimited update messages to each
//! - **Sweeper**: periodically purges expired buckets to bound memory
//!
//! ## Architecture
//!
//! ```text
//!  Event transport ──▶ Ingest worker ──▶ SwapPipeline
//!  (queue/simulator)        │                │ increments
//!                           │                ▼
//!                           │          StatsEngine ◀── QueryService
//!                           │                │               (API surface)
//!                           │                ▼
//!                           │          CounterStore (TTL buckets)
//!                           │
//!                           └─ snapshots ──▶ update queue ──▶ Fan-out worker
//!                                                                 │
//!                                                                 ▼
//!                                                          SubscriberHub
//!                                                            │  │  │
//!                                                     subscriber connections
//! ```

pub mod bootstrap;
pub mod config;
pub mod listener;
pub mod service;

// Re-export main types
pub use bootstrap::ServiceBootstrap;
pub use config::{RunnerConfig, ServiceConfig};
pub use listener::serve_subscribers;
pub use service::StatsService;
