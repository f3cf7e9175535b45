//! Swapstats Fan-out
//!
//! In-process broadcast of stats update messages to all currently
//! registered subscriber connections. One mutex guards the registry;
//! delivery is one synchronous attempt per subscriber per message, and a
//! failed attempt evicts the subscriber rather than retrying.

mod hub;
mod sink;

pub use hub::{PublishOutcome, SubscriberHub, SubscriberId};
pub use sink::{ChannelSink, DeliveryError, SubscriberSink};
