use chrono::Duration;
use std::sync::RwLock;
use swapstats_core::Timestamp;
use swapstats_ports::Clock;

/// Manually controlled clock for deterministic tests
///
/// Time only moves when told to. Shared freely across tasks via `Arc`.
pub struct ManualClock {
    now: RwLock<Timestamp>,
}

impl ManualClock {
    /// Create a clock frozen at `start`
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: RwLock::new(start),
        }
    }

    /// Jump to an absolute time
    pub fn set(&self, to: Timestamp) {
        *self.now.write().unwrap() = to;
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write().unwrap();
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.read().unwrap()
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}
