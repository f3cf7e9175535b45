//! Error types for the gateway crate

use thiserror::Error;

/// Transport-level errors
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Send failed: {0}")]
    Send(String),

    #[error("Channel closed")]
    ChannelClosed,
}

/// Wire codec errors
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Failed to encode swap event: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode swap event: {0}")]
    Decode(#[source] serde_json::Error),
}
