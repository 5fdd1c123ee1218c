//! Player commands sent from the presentation layer to the simulation.
//!
//! Commands are queued and applied at the next tick boundary, or applied
//! directly through `SimulationEngine::handle_command`.

use serde::{Deserialize, Serialize};

use crate::components::TowerId;
use crate::enums::TowerKind;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Scene control ---
    /// Start a fresh session from the menu or an end screen.
    StartGame,
    /// Abandon the current scene and go back to the menu.
    ReturnToMenu,

    // --- Pointer input (play-area coordinates) ---
    /// Select a placed tower, deselect, or place a tower.
    PointerDown { x: f32, y: f32 },
    /// Move the placement preview.
    PointerMove { x: f32, y: f32 },

    // --- Tower management ---
    /// Toggle the tower kind to place next.
    SelectTowerKind { kind: TowerKind },
    /// Clear the placed-tower selection.
    DeselectTower,
    /// Sell the selected tower for a partial refund.
    SellSelectedTower,
}

/// Non-error result of a command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CommandOutcome {
    /// The command had no effect (e.g. pointer outside the game area).
    Ignored,
    SceneChanged,
    TowerPlaced { tower: TowerId },
    TowerSelected { tower: TowerId },
    TowerDeselected,
    TowerSold { tower: TowerId, refund: u32 },
    TowerKindSelected { kind: TowerKind },
    TowerKindCleared,
    PreviewMoved { affordable: bool },
}
