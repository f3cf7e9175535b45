use crate::entity::Entity;
use crate::stats::Stats;
use crate::window::Window;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Message pushed to subscribers after each increment: the freshly written
/// bucket snapshot of one entity, keyed by `"{entity}:{window}"`, for every
/// window at once.
///
/// Serializes transparently as the map itself, e.g.
/// `{"ETH:5min":{"volume":150.0,"tx_count":2},"ETH:1h":...}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsUpdate {
    pub entries: BTreeMap<String, Stats>,
}

impl StatsUpdate {
    /// Key under which one entity/window combination is published
    pub fn key(entity: &Entity, window: Window) -> String {
        format!("{}:{}", entity.id(), window)
    }

    /// Build the update message for one entity from its per-window bucket
    /// snapshots
    pub fn from_snapshots(entity: &Entity, snapshots: &BTreeMap<Window, Stats>) -> Self {
        let entries = snapshots
            .iter()
            .map(|(window, stats)| (Self::key(entity, *window), *stats))
            .collect();
        Self { entries }
    }
}
