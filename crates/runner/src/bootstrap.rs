//! Bootstrap - construction and wiring of the service components
//!
//! Builds the object graph in dependency order: clock, counter store,
//! engine, pipeline, fan-out hub. The caller decides which clock to inject
//! (system clock in production, manual clock in tests).

use crate::config::ServiceConfig;
use std::sync::Arc;
use swapstats_clock::SystemClock;
use swapstats_engine::{QueryService, StatsEngine, SwapPipeline};
use swapstats_fanout::SubscriberHub;
use swapstats_ports::Clock;
use swapstats_store::MemoryCounterStore;
use tokio::sync::mpsc;

/// Fully wired service components, ready for workers to run
pub struct ServiceBootstrap {
    /// Counter store; kept concrete so the sweeper can purge it
    pub store: Arc<MemoryCounterStore>,
    pub engine: Arc<StatsEngine>,
    /// Read path handed to the external API surface
    pub query: Arc<QueryService>,
    pub hub: Arc<SubscriberHub>,
    pub pipeline: SwapPipeline,
    /// Receiving side of the internal update queue, drained by the
    /// fan-out worker
    pub updates_rx: mpsc::Receiver<String>,
}

impl ServiceBootstrap {
    /// Wire the service against the real system clock
    pub fn new(config: &ServiceConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Wire the service with an injected clock
    pub fn with_clock(config: &ServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let store = Arc::new(MemoryCounterStore::new(clock.clone()));
        let engine = Arc::new(StatsEngine::new(store.clone(), clock));
        let query = Arc::new(QueryService::new(engine.clone()));
        let hub = Arc::new(SubscriberHub::new());

        let (updates_tx, updates_rx) = mpsc::channel(config.update_queue_capacity);
        let pipeline = SwapPipeline::new(engine.clone(), updates_tx);

        Self {
            store,
            engine,
            query,
            hub,
            pipeline,
            updates_rx,
        }
    }
}
