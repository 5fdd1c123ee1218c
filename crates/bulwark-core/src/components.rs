//! ECS components for enemies, towers, and projectiles.
//!
//! Components are plain data structs. Game logic lives in the simulation's
//! systems, not here.

use serde::{Deserialize, Serialize};

use crate::enums::{EnemyKind, TowerKind};
use crate::stats::TowerStats;
use crate::types::Rgb;

/// Stable identity of an enemy, unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

/// Stable identity of a tower, unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(pub u32);

/// Stable identity of a projectile, unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(pub u32);

/// A hostile unit walking the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub hp: f32,
    pub max_hp: f32,
    pub traverse_ms: f64,
    pub scale: f32,
    pub tint: Rgb,
    pub reward: u32,
    pub score: u32,
    pub spawn_on_death: u32,
    /// Part of `spawn_on_death` already counted in the wave total.
    pub precounted_minions: u32,
    /// Set once when the path end is reached. Terminal.
    pub reached_end: bool,
    pub active: bool,
}

/// Arc-length progress along the path, 0.0 at spawn and 1.0 at the base.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PathFollower {
    pub progress: f32,
}

/// A placed tower. Never moves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tower {
    pub id: TowerId,
    pub kind: TowerKind,
    pub range: f32,
    pub fire_interval_ms: f64,
    pub projectile_speed: f32,
    pub damage: f32,
    pub cost: u32,
    pub color: Rgb,
    pub projectile_color: Rgb,
    /// Host clock of the last shot (ms). Starts at 0.
    pub last_fired_ms: f64,
    pub kills: u32,
    pub damage_dealt: f32,
}

impl Tower {
    /// A fresh tower with the preset copied onto it.
    pub fn from_stats(id: TowerId, kind: TowerKind, stats: &TowerStats) -> Self {
        Self {
            id,
            kind,
            range: stats.range,
            fire_interval_ms: stats.fire_interval_ms,
            projectile_speed: stats.projectile_speed,
            damage: stats.damage,
            cost: stats.cost,
            color: stats.color,
            projectile_color: stats.projectile_color,
            last_fired_ms: 0.0,
            kills: 0,
            damage_dealt: 0.0,
        }
    }

    /// Shots per second as shown on the details panel.
    pub fn fire_rate_per_sec(&self) -> f64 {
        1000.0 / self.fire_interval_ms
    }

    /// Currency refunded when the tower is sold, floored.
    pub fn sell_price(&self, refund_ratio: f32) -> u32 {
        (self.cost as f32 * refund_ratio).floor() as u32
    }
}

/// A homing shot. The target handle lives beside it in the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub source: TowerId,
    pub damage: f32,
    pub speed: f32,
    pub color: Rgb,
}
