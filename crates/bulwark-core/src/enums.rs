//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy archetype. Each kind maps to a fixed stat preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    Basic,
    Fast,
    Tank,
    /// Splits into minions on death.
    Boss,
    /// Spawned by a dying boss, never scheduled directly.
    Minion,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 5] = [
        EnemyKind::Basic,
        EnemyKind::Fast,
        EnemyKind::Tank,
        EnemyKind::Boss,
        EnemyKind::Minion,
    ];
}

/// Tower archetype available for purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TowerKind {
    /// Cheap, medium range.
    Basic,
    /// Long range, slow, heavy hits.
    Sniper,
    /// Short range, fast fire rate.
    Rapid,
}

impl TowerKind {
    /// Every purchasable kind, in selection-bar order.
    pub const ALL: [TowerKind; 3] = [TowerKind::Basic, TowerKind::Sniper, TowerKind::Rapid];

    /// Display name shown on the selection bar and details panel.
    pub fn name(self) -> &'static str {
        match self {
            TowerKind::Basic => "Basic",
            TowerKind::Sniper => "Sniper",
            TowerKind::Rapid => "Rapid",
        }
    }
}

/// Top-level scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Playing,
    Victory,
    Defeat,
}

/// Derived lifecycle of the current wave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// No wave has been started yet.
    #[default]
    Idle,
    /// Wave name is on screen; spawning has not begun.
    Announcing,
    /// Spawn entries are still being walked.
    Spawning,
    /// All entries released; waiting for the field to clear.
    Draining,
    /// Cleared; inter-wave pause running.
    Complete,
}

/// Kind of transient message raised for a rejected action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    SelectTowerFirst,
    CannotAfford,
}

impl NoticeKind {
    pub fn text(self) -> &'static str {
        match self {
            NoticeKind::SelectTowerFirst => "Select a turret first!",
            NoticeKind::CannotAfford => "Cannot afford!",
        }
    }
}
