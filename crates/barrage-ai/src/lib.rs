//! Enemy AI for BARRAGE.
//!
//! Closed-form ballistic targeting, the per-tick fire/move decision,
//! and level-scaled enemy stat rolls.

pub mod profiles;
pub mod solver;
pub mod targeting;

pub use barrage_core as core;
