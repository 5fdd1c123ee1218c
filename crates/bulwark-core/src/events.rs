//! Events emitted by the simulation for UI and audio feedback.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::{EnemyId, ProjectileId, TowerId};
use crate::enums::{EnemyKind, NoticeKind, TowerKind};

/// One-shot notifications drained into every snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A wave name is on screen; spawning follows after the announcement.
    WaveAnnounced { wave_index: usize, name: String },
    /// The last spawn entry of the wave was released.
    WaveSpawningFinished { wave_index: usize },
    /// The field is clear. `bonus` is paid when the inter-wave pause ends.
    WaveCompleted { wave_index: usize, bonus: u32 },
    EnemySpawned { enemy: EnemyId, kind: EnemyKind },
    EnemyKilled {
        enemy: EnemyId,
        kind: EnemyKind,
        reward: u32,
        score: u32,
        tower: Option<TowerId>,
    },
    /// An enemy reached the base.
    EnemyLeaked { enemy: EnemyId, lives_remaining: u32 },
    ProjectileFired {
        projectile: ProjectileId,
        tower: TowerId,
        target: EnemyId,
    },
    TowerPlaced {
        tower: TowerId,
        kind: TowerKind,
        position: Vec2,
        cost: u32,
    },
    TowerSold { tower: TowerId, refund: u32 },
    /// A rejected action raised an on-screen message.
    NoticeRaised { kind: NoticeKind, position: Vec2 },
    Victory { score: u32 },
    Defeat { score: u32 },
}

/// Transient on-screen message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub id: u32,
    pub kind: NoticeKind,
    pub position: Vec2,
    pub raised_at_ms: f64,
}
