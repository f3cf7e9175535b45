use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Aggregate totals for one entity.
///
/// The same shape carries two meanings depending on context: the totals of a
/// single bucket (returned on write) or the sum across every bucket in a
/// window's look-back range (returned on read).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Traded volume in USD
    pub volume: f64,
    /// Number of transactions
    pub tx_count: u64,
}

impl Stats {
    /// Create stats with explicit totals
    pub fn new(volume: f64, tx_count: u64) -> Self {
        Self { volume, tx_count }
    }

    /// True when no activity has been recorded
    pub fn is_zero(&self) -> bool {
        self.tx_count == 0 && self.volume == 0.0
    }
}

impl Add for Stats {
    type Output = Stats;

    fn add(self, rhs: Stats) -> Stats {
        Stats {
            volume: self.volume + rhs.volume,
            tx_count: self.tx_count + rhs.tx_count,
        }
    }
}

impl AddAssign for Stats {
    fn add_assign(&mut self, rhs: Stats) {
        self.volume += rhs.volume;
        self.tx_count += rhs.tx_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_default() {
        let stats = Stats::default();
        assert!(stats.is_zero());
        assert_eq!(stats.volume, 0.0);
        assert_eq!(stats.tx_count, 0);
    }

    #[test]
    fn test_accumulation() {
        let mut total = Stats::default();
        total += Stats::new(100.0, 1);
        total += Stats::new(50.0, 1);

        assert_eq!(total, Stats::new(150.0, 2));
        assert!(!total.is_zero());
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(Stats::new(42.5, 3)).unwrap();
        assert_eq!(json["volume"], 42.5);
        assert_eq!(json["tx_count"], 3);
    }
}
