use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::System;

/// Hours credited to the play-time counter for every launch.
/// Stands in for real elapsed-time tracking.
pub const PLAY_TIME_PER_LAUNCH_HOURS: f64 = 0.5;

/// Cumulative usage counters, persisted across sessions.
/// Monotonically non-decreasing except on explicit reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    /// Number of launches (not library size)
    pub total_games: u64,
    /// Hours
    pub play_time: f64,
    pub favorite_games: u32,
    pub achievements: u32,
    /// Launch counts per system
    pub system_distribution: BTreeMap<System, u64>,
}

impl Stats {
    pub fn launches_for(&self, system: System) -> u64 {
        self.system_distribution.get(&system).copied().unwrap_or(0)
    }

    /// Count one launch of a game on `system`
    pub fn count_launch(&mut self, system: System) {
        self.total_games += 1;
        self.play_time += PLAY_TIME_PER_LAUNCH_HOURS;
        *self.system_distribution.entry(system).or_insert(0) += 1;
    }
}

/// Size of the currently indexed library.
/// Derived on demand; never persisted and never mixed with launch counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LibraryDistribution {
    pub total_games: usize,
    /// Only systems with at least one indexed game
    pub per_system: BTreeMap<System, usize>,
}
