//! Rejections for player commands.
//!
//! All of these are game-rule refusals: state is left unchanged.

use thiserror::Error;

use crate::enums::GamePhase;

/// Why a tower placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("no tower kind selected")]
    NoTowerKindSelected,
    #[error("tower costs {cost} but only {available} is available")]
    InsufficientFunds { cost: u32, available: u32 },
    #[error("position is outside the game area")]
    OutsideGameArea,
}

/// Why a player command was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("command not accepted during {phase:?}")]
    InvalidPhase { phase: GamePhase },
    #[error("placement rejected: {0}")]
    Placement(#[from] PlacementError),
    #[error("no tower is selected")]
    NoTowerSelected,
}
