//! Wire codec for swap event payloads
//!
//! Payloads on the event transport are JSON-encoded [`SwapEvent`]s, matching
//! the schema produced by the upstream event producer.

use crate::error::CodecError;
use swapstats_core::SwapEvent;

/// Encode a swap event for the transport
pub fn encode_swap_event(event: &SwapEvent) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(event).map_err(CodecError::Encode)
}

/// Decode a transport payload into a swap event
pub fn decode_swap_event(payload: &[u8]) -> Result<SwapEvent, CodecError> {
    serde_json::from_slice(payload).map_err(CodecError::Decode)
}
