//! Swapstats Gateway
//!
//! Event-transport layer for the swap stats service. Provides:
//! - Wire codec for swap event payloads (JSON)
//! - Transport abstraction (tokio channels, with traits so a message-queue
//!   client can be plugged in without touching the pipeline)
//! - Swap event simulator adapter for single-process runs and tests
//!
//! ## Transport
//!
//! The transport contract is ordered, at-least-once delivery of opaque
//! payloads. The channel implementation covers single-process operation;
//! the `EventPublisher`/`EventSubscriber` traits are the seam where a real
//! broker consumer would sit.

pub mod adapters;
pub mod error;
pub mod messages;
pub mod transport;

// Re-export commonly used types
pub use adapters::simulator::{SimulatorConfig, SwapSimulator, TokenInfo};
pub use error::{CodecError, TransportError};
pub use messages::{decode_swap_event, encode_swap_event};
pub use transport::{
    EventPublisher, EventSubscriber,
    channel::{ChannelEventPublisher, ChannelEventSubscriber, event_channel},
};
