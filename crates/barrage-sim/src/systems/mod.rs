//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` and the current level.
//! Removals they decide on are queued in [`cleanup::PendingChanges`] and
//! applied once, after every collision and damage pass of the tick.

pub mod ballistics;
pub mod cleanup;
pub mod enemy_ai;
pub mod explosions;
pub mod impacts;
pub mod movement;
pub mod obstacles;
pub mod snapshot;
