//! Fixed stat presets for enemy and tower kinds.

use serde::{Deserialize, Serialize};

use crate::enums::{EnemyKind, TowerKind};
use crate::types::Rgb;

/// Stat preset applied to an enemy at spawn time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub hp: f32,
    /// Time to traverse the whole path (ms).
    pub traverse_ms: f64,
    /// Visual scale; also scales the hit radius.
    pub scale: f32,
    pub tint: Rgb,
    /// Currency granted on kill.
    pub reward: u32,
    /// Score granted on kill.
    pub score: u32,
    /// Minions released at the path start when killed.
    #[serde(default)]
    pub spawn_on_death: u32,
}

/// Stat preset copied onto a tower when it is placed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TowerStats {
    pub range: f32,
    /// Minimum time between shots (ms).
    pub fire_interval_ms: f64,
    /// Projectile speed (pixels per second).
    pub projectile_speed: f32,
    pub damage: f32,
    pub cost: u32,
    pub color: Rgb,
    pub projectile_color: Rgb,
}

/// Preset table for every enemy kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyRoster {
    pub basic: EnemyStats,
    pub fast: EnemyStats,
    pub tank: EnemyStats,
    pub boss: EnemyStats,
    pub minion: EnemyStats,
}

impl EnemyRoster {
    pub fn get(&self, kind: EnemyKind) -> &EnemyStats {
        match kind {
            EnemyKind::Basic => &self.basic,
            EnemyKind::Fast => &self.fast,
            EnemyKind::Tank => &self.tank,
            EnemyKind::Boss => &self.boss,
            EnemyKind::Minion => &self.minion,
        }
    }
}

impl Default for EnemyRoster {
    fn default() -> Self {
        Self {
            basic: EnemyStats {
                hp: 3.0,
                traverse_ms: 12_000.0,
                scale: 1.0,
                tint: Rgb(0xff0000),
                reward: 20,
                score: 10,
                spawn_on_death: 0,
            },
            fast: EnemyStats {
                hp: 2.0,
                traverse_ms: 8_000.0,
                scale: 0.8,
                tint: Rgb(0x00ff00),
                reward: 25,
                score: 15,
                spawn_on_death: 0,
            },
            tank: EnemyStats {
                hp: 8.0,
                traverse_ms: 15_000.0,
                scale: 1.5,
                tint: Rgb(0x0000ff),
                reward: 35,
                score: 25,
                spawn_on_death: 0,
            },
            boss: EnemyStats {
                hp: 15.0,
                traverse_ms: 15_000.0,
                scale: 2.0,
                tint: Rgb(0xff00ff),
                reward: 100,
                score: 50,
                spawn_on_death: 4,
            },
            minion: EnemyStats {
                hp: 2.0,
                traverse_ms: 10_000.0,
                scale: 0.7,
                tint: Rgb(0xff00ff),
                reward: 15,
                score: 10,
                spawn_on_death: 0,
            },
        }
    }
}

/// Preset table for every tower kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerRoster {
    pub basic: TowerStats,
    pub sniper: TowerStats,
    pub rapid: TowerStats,
}

impl TowerRoster {
    pub fn get(&self, kind: TowerKind) -> &TowerStats {
        match kind {
            TowerKind::Basic => &self.basic,
            TowerKind::Sniper => &self.sniper,
            TowerKind::Rapid => &self.rapid,
        }
    }
}

impl Default for TowerRoster {
    fn default() -> Self {
        Self {
            basic: TowerStats {
                range: 150.0,
                fire_interval_ms: 1000.0,
                projectile_speed: 500.0,
                damage: 1.0,
                cost: 50,
                color: Rgb(0x00ff00),
                projectile_color: Rgb(0xffff00),
            },
            sniper: TowerStats {
                range: 300.0,
                fire_interval_ms: 2000.0,
                projectile_speed: 800.0,
                damage: 2.0,
                cost: 100,
                color: Rgb(0x0000ff),
                projectile_color: Rgb(0xff00ff),
            },
            rapid: TowerStats {
                range: 100.0,
                fire_interval_ms: 300.0,
                projectile_speed: 600.0,
                damage: 0.5,
                cost: 150,
                color: Rgb(0xff0000),
                projectile_color: Rgb(0xffffff),
            },
        }
    }
}
