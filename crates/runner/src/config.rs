use std::net::SocketAddr;
use std::time::Duration;
use swapstats_gateway::SimulatorConfig;

/// Tunables for the running service.
///
/// Configuration is injected by the surrounding process; these structs carry
/// defaults suitable for local runs and tests, with no flag or environment
/// parsing of their own.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Capacity of the internal snapshot-update queue between the pipeline
    /// and the fan-out worker
    pub update_queue_capacity: usize,
    /// Per-subscriber outbound queue capacity; a subscriber that lets its
    /// queue fill up is evicted
    pub subscriber_queue_capacity: usize,
    /// How often expired buckets are physically removed
    pub sweep_interval: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            update_queue_capacity: 1024,
            subscriber_queue_capacity: 64,
            sweep_interval: Duration::from_secs(60),
        }
    }
}

/// Full configuration for the runner binary
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub service: ServiceConfig,
    /// Where the subscriber endpoint listens
    pub listen_addr: SocketAddr,
    /// Capacity of the event transport channel
    pub event_queue_capacity: usize,
    /// Simulated event source settings
    pub simulator: SimulatorConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            listen_addr: ([127, 0, 0, 1], 8082).into(),
            event_queue_capacity: 512,
            simulator: SimulatorConfig::default(),
        }
    }
}
