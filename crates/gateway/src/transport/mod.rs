//! Transport abstraction layer
//!
//! Unified traits for moving opaque event payloads. The channel
//! implementation serves single-process operation; the traits are the seam
//! where a message-queue consumer/producer would plug in.
//!
//! Contract: payloads arrive in publish order, at least once. Consumers own
//! redelivery policy; the pipeline only reports per-event outcomes.

pub mod channel;

use crate::error::TransportError;
use async_trait::async_trait;

/// Publisher - sends opaque payloads onto the event stream
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a payload
    async fn publish(&self, payload: Vec<u8>) -> Result<(), TransportError>;
}

/// Subscriber - receives opaque payloads from the event stream
#[async_trait]
pub trait EventSubscriber: Send {
    /// Wait for the next payload; blocks until one arrives or the
    /// transport shuts down
    async fn next(&mut self) -> Result<Vec<u8>, TransportError>;
}
