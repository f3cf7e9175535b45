use crate::engine::StatsEngine;
use crate::error::EngineResult;
use std::sync::Arc;
use swapstats_core::{Entity, Stats, Window};

/// Synchronous read path for an external API surface.
///
/// The surface itself (routing, request validation, docs) lives outside this
/// service; this type is the contract it calls into. Absence of recent
/// activity yields a zero-valued result, distinct from a storage error.
pub struct QueryService {
    engine: Arc<StatsEngine>,
}

impl QueryService {
    pub fn new(engine: Arc<StatsEngine>) -> Self {
        Self { engine }
    }

    /// Stats for a single token over `window`
    pub async fn token_stats(&self, symbol: &str, window: Window) -> EngineResult<Stats> {
        self.engine.query(&Entity::token(symbol), window).await
    }

    /// Stats for a directional pair over `window`
    pub async fn pair_stats(&self, from: &str, to: &str, window: Window) -> EngineResult<Stats> {
        self.engine.query(&Entity::pair(from, to), window).await
    }
}
