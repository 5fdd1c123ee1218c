//! Wave definitions: ordered spawn entries released by the wave scheduler.
//!
//! The JSON shape mirrors the classic level data:
//! `{"count": 3, "delay": 2000, "type": "basic"}` is a spawn directive and
//! `{"delay": 3000}` is a pure pause.

use serde::{Deserialize, Serialize};

use crate::enums::EnemyKind;
use crate::stats::EnemyRoster;

/// One step of a wave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpawnEntry {
    /// Release `count` enemies of `kind`, one every `delay_ms`.
    Spawn {
        count: u32,
        #[serde(rename = "delay", default)]
        delay_ms: f64,
        #[serde(rename = "type")]
        kind: EnemyKind,
        /// Death-spawned minions already included in the wave total.
        /// Capped by the preset's own `spawn_on_death`.
        #[serde(rename = "spawnOnDeath", default, skip_serializing_if = "is_zero")]
        spawn_on_death: u32,
    },
    /// Wait `delay_ms` before moving to the next entry.
    Delay {
        #[serde(rename = "delay")]
        delay_ms: f64,
    },
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl SpawnEntry {
    pub fn spawn(count: u32, delay_ms: f64, kind: EnemyKind) -> Self {
        SpawnEntry::Spawn {
            count,
            delay_ms,
            kind,
            spawn_on_death: 0,
        }
    }

    pub fn delay(delay_ms: f64) -> Self {
        SpawnEntry::Delay { delay_ms }
    }

    /// Minions per spawned enemy that are counted up front rather than at
    /// death time.
    pub fn precounted_minions(&self, roster: &EnemyRoster) -> u32 {
        match self {
            SpawnEntry::Spawn {
                kind,
                spawn_on_death,
                ..
            } => (*spawn_on_death).min(roster.get(*kind).spawn_on_death),
            SpawnEntry::Delay { .. } => 0,
        }
    }
}

/// A named, ordered list of spawn entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveDefinition {
    pub name: String,
    #[serde(rename = "enemies")]
    pub entries: Vec<SpawnEntry>,
}

impl WaveDefinition {
    /// Enemies this wave is expected to produce, as known at wave start.
    ///
    /// Each scheduled enemy counts once plus any minions its entry
    /// pre-declares; the rest of a boss's minions are added when it dies.
    pub fn total_enemies(&self, roster: &EnemyRoster) -> u32 {
        self.entries
            .iter()
            .map(|entry| match entry {
                SpawnEntry::Spawn { count, .. } => count * (1 + entry.precounted_minions(roster)),
                SpawnEntry::Delay { .. } => 0,
            })
            .sum()
    }
}

/// The three-wave campaign.
pub fn default_waves() -> Vec<WaveDefinition> {
    vec![
        WaveDefinition {
            name: "Wave 1 - Basic".to_string(),
            entries: vec![
                SpawnEntry::spawn(3, 2000.0, EnemyKind::Basic),
                SpawnEntry::spawn(2, 1000.0, EnemyKind::Fast),
            ],
        },
        WaveDefinition {
            name: "Wave 2 - Groups".to_string(),
            entries: vec![
                SpawnEntry::spawn(2, 500.0, EnemyKind::Tank),
                SpawnEntry::delay(3000.0),
                SpawnEntry::spawn(4, 500.0, EnemyKind::Fast),
                SpawnEntry::delay(3000.0),
                SpawnEntry::spawn(3, 400.0, EnemyKind::Basic),
            ],
        },
        WaveDefinition {
            name: "Wave 3 - Boss".to_string(),
            entries: vec![SpawnEntry::spawn(1, 1000.0, EnemyKind::Boss)],
        },
    ]
}
