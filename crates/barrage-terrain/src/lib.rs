//! Terrain system for BARRAGE.
//!
//! Destructible ground generation, chunked cell storage,
//! broadphase range queries and narrow-phase overlap tests.

pub use barrage_core as core;

pub mod broadphase;
pub mod collision;
pub mod generation;
pub mod grid;

// Re-export key types for convenience.
pub use broadphase::{cells_in_span, cells_near};
pub use collision::{circle_touches_rect, mirror_angle, nearest_face, rects_overlap};
pub use generation::{generate, TerrainParams};
pub use grid::{CellFlags, CellId, GroundCell, Terrain, TerrainChunk};
