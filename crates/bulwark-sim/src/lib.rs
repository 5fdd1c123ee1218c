//! Simulation for BULWARK, a single-lane tower-defense game.
//!
//! Owns the hecs entity registry, runs the wave scheduler and combat
//! systems from the host clock, and produces GameStateSnapshots for the
//! presentation layer.

pub mod config;
pub mod economy;
pub mod engine;
pub mod path;
pub mod registry;
pub mod scheduler;
pub mod session;
pub mod systems;
pub mod wave;

pub use bulwark_core;
pub use config::{ConfigError, SessionConfig};
pub use engine::{Scene, SimulationEngine};
pub use session::{GameSession, SessionOutcome};

#[cfg(test)]
mod tests;
