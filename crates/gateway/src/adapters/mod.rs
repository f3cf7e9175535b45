//! Event source adapters
//!
//! Adapters produce swap event payloads for the transport layer. The
//! simulator stands in for the upstream producer in single-process runs and
//! tests.

pub mod simulator;

pub use simulator::{SimulatorConfig, SwapSimulator, TokenInfo};
