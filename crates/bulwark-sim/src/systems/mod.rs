//! Per-tick systems that operate on a game session.
//!
//! Systems are free functions over `&mut GameSession` (or `&GameSession` for
//! read-only work). They do not own state; everything lives in the session.

pub mod enemy_movement;
pub mod projectiles;
pub mod snapshot;
pub mod targeting;
