//! Game state snapshot: the complete visible state handed to the presentation
//! layer after each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::{EnemyId, ProjectileId, TowerId};
use crate::enums::*;
use crate::events::{GameEvent, Notice};
use crate::types::{Rgb, SimTime};

/// Complete game state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u32,
    pub currency: u32,
    /// HUD label, `WAVE n/N`.
    pub wave_label: String,
    /// Wave name while it is being announced.
    pub announcement: Option<String>,
    pub wave: WaveView,
    pub enemies: Vec<EnemyView>,
    pub towers: Vec<TowerView>,
    pub projectiles: Vec<ProjectileView>,
    pub selected_kind: Option<TowerKind>,
    pub selected_tower: Option<TowerDetails>,
    pub placement_preview: Option<PlacementPreview>,
    pub notices: Vec<Notice>,
    /// Events raised since the previous snapshot.
    pub events: Vec<GameEvent>,
    /// Set on the Victory and Defeat screens.
    pub final_score: Option<u32>,
}

/// Wave progress for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    /// Zero-based index of the current wave.
    pub index: usize,
    pub total_waves: usize,
    pub phase: WavePhase,
    /// True from the announcement until every enemy is resolved.
    pub in_progress: bool,
    pub spawned: u32,
    pub killed: u32,
    pub total: u32,
}

/// An enemy as drawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub position: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    pub progress: f32,
    pub scale: f32,
    pub tint: Rgb,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub id: TowerId,
    pub kind: TowerKind,
    pub position: Vec2,
    pub range: f32,
    pub color: Rgb,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: ProjectileId,
    pub position: Vec2,
    pub color: Rgb,
}

/// Stats panel for a selected tower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerDetails {
    pub id: TowerId,
    pub name: String,
    pub position: Vec2,
    pub damage: f32,
    pub fire_rate_per_sec: f64,
    pub range: f32,
    pub kills: u32,
    /// Floored for display.
    pub damage_dealt: u32,
    pub sell_price: u32,
}

/// Ghost tower following the pointer while a kind is selected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementPreview {
    pub kind: TowerKind,
    pub position: Vec2,
    pub range: f32,
    pub affordable: bool,
}
