//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{CANVAS_WIDTH, GAME_AREA_HEIGHT, GAME_AREA_TOP};

/// World-space position component (pixels, y grows downward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// Velocity component (pixels per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

/// 24-bit RGB colour used for tints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub u32);

/// Simulation time as delivered by the host clock.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks processed in the current session.
    pub tick: u64,
    /// Host clock at the most recent tick (ms).
    pub now_ms: f64,
}

impl SimTime {
    /// Record a tick at `now_ms`.
    pub fn advance(&mut self, now_ms: f64) {
        self.tick += 1;
        self.now_ms = now_ms;
    }
}

/// Axis-aligned rectangle that accepts pointer input.
///
/// The vertical bounds are exclusive so clicks on the edge of the HUD bars
/// never reach the game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameArea {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl GameArea {
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y > self.y
            && point.y < self.y + self.height
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

impl Default for GameArea {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: GAME_AREA_TOP,
            width: CANVAS_WIDTH,
            height: GAME_AREA_HEIGHT,
        }
    }
}
