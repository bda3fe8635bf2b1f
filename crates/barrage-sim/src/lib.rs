//! Simulation engine for BARRAGE.
//!
//! Owns the hecs ECS world and the current level, runs systems in a fixed
//! order each tick, and produces GameStateSnapshots for the frontend.

pub mod combatant;
pub mod engine;
pub mod level;
pub mod systems;
pub mod world_setup;

pub use barrage_core as core;
pub use engine::SimulationEngine;

#[cfg(test)]
mod tests;
