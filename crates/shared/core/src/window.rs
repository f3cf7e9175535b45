use crate::values::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Sliding look-back window over which stats are aggregated.
///
/// Each window is a fixed number of buckets at a fixed granularity:
///
/// | window | buckets | granularity | span |
/// |--------|---------|-------------|------|
/// | 5min   | 5       | 1 minute    | 5m   |
/// | 1h     | 12      | 5 minutes   | 60m  |
/// | 24h    | 24      | 1 hour      | 24h  |
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Window {
    #[serde(rename = "5min")]
    FiveMin,
    #[serde(rename = "1h")]
    Hour,
    #[serde(rename = "24h")]
    Day,
}

impl Window {
    /// All windows, in ascending span order
    pub const ALL: [Window; 3] = [Window::FiveMin, Window::Hour, Window::Day];

    /// Canonical label used in keys and query parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            Window::FiveMin => "5min",
            Window::Hour => "1h",
            Window::Day => "24h",
        }
    }

    /// Width of one bucket
    pub fn granularity(&self) -> Duration {
        match self {
            Window::FiveMin => Duration::from_secs(60),
            Window::Hour => Duration::from_secs(5 * 60),
            Window::Day => Duration::from_secs(60 * 60),
        }
    }

    /// Number of buckets in the look-back range
    pub fn bucket_count(&self) -> u32 {
        match self {
            Window::FiveMin => 5,
            Window::Hour => 12,
            Window::Day => 24,
        }
    }

    /// Total window span; also the TTL of each bucket
    pub fn span(&self) -> Duration {
        self.granularity() * self.bucket_count()
    }

    /// Epoch-second start of the bucket containing `at`,
    /// i.e. `floor(at, granularity)`
    pub fn bucket_start(&self, at: Timestamp) -> i64 {
        let granularity = self.granularity().as_secs() as i64;
        let ts = at.timestamp();
        ts - ts.rem_euclid(granularity)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized window label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWindowError(pub String);

impl fmt::Display for ParseWindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown window label: {}", self.0)
    }
}

impl std::error::Error for ParseWindowError {}

impl FromStr for Window {
    type Err = ParseWindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "5min" => Ok(Window::FiveMin),
            "1h" => Ok(Window::Hour),
            "24h" => Ok(Window::Day),
            other => Err(ParseWindowError(other.to_string())),
        }
    }
}
