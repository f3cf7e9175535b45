use crate::window::Window;
use std::fmt;

/// Identity of one time bucket: the explicit `(entity, window, bucket_start)`
/// triple. Both the write and the read path build keys through this type so
/// the two sides can never disagree on the key scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketKey {
    /// Rendered entity id, e.g. `"ETH"` or `"ETH-BTC"`
    pub entity: String,
    pub window: Window,
    /// Epoch seconds, floored to the window's granularity
    pub bucket_start: i64,
}

impl BucketKey {
    pub fn new(entity: impl Into<String>, window: Window, bucket_start: i64) -> Self {
        Self {
            entity: entity.into(),
            window,
            bucket_start,
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stats:{}:{}:{}",
            self.entity, self.window, self.bucket_start
        )
    }
}
