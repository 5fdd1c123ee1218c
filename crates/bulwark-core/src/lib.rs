//! Core types and definitions for the BULWARK tower-defense simulation.
//!
//! This crate defines the vocabulary shared between the simulation and any
//! presentation layer: components, stat presets, wave definitions, commands,
//! events, snapshots, errors, and constants. It has no dependency on an ECS
//! or a rendering framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod errors;
pub mod events;
pub mod state;
pub mod stats;
pub mod types;
pub mod waves;
