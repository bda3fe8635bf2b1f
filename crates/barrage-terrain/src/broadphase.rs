//! Chunk-indexed broadphase queries.
//!
//! Both queries return a superset of the cells that can touch the query
//! rectangle. The narrow phase in [`crate::collision`] does the exact test.

use barrage_core::enums::Direction;
use barrage_core::types::Aabb;

use crate::grid::{CellId, Terrain};

/// Cells in the chunks swept by `bounds` moving `dx` horizontally, plus the
/// neighbour chunk in the direction of travel. A stationary query adds no
/// neighbour.
///
/// The sweep covers `[min(x, x + dx), max(right, right + dx)]`, so a step
/// wider than a chunk still sees every cell it can run into.
pub fn cells_near(terrain: &Terrain, bounds: &Aabb, dx: f64) -> Vec<CellId> {
    if terrain.chunk_count() == 0 {
        return Vec::new();
    }
    let x_lo = bounds.x().min(bounds.x() + dx);
    let x_hi = bounds.right().max(bounds.right() + dx);
    let (mut lo, mut hi) = chunk_range(terrain, x_lo, x_hi);
    match Direction::of_delta(dx) {
        Some(Direction::Left) => lo = lo.saturating_sub(1),
        Some(Direction::Right) => hi = (hi + 1).min(terrain.chunk_count() - 1),
        None => {}
    }
    collect(terrain, lo, hi)
}

/// Cells in every chunk overlapping `[x_lo, x_hi]`, plus one neighbour on each side.
pub fn cells_in_span(terrain: &Terrain, x_lo: f64, x_hi: f64) -> Vec<CellId> {
    if terrain.chunk_count() == 0 {
        return Vec::new();
    }
    let (lo, hi) = chunk_range(terrain, x_lo, x_hi);
    collect(terrain, lo.saturating_sub(1), (hi + 1).min(terrain.chunk_count() - 1))
}

fn chunk_range(terrain: &Terrain, x_lo: f64, x_hi: f64) -> (usize, usize) {
    // Widened slightly so a cell edge sitting on a chunk boundary is never missed.
    let margin = terrain.cell_size() * 1e-6;
    let lo = terrain.chunk_index_of(x_lo - margin);
    let hi = terrain.chunk_index_of(x_hi + margin);
    (lo, hi.max(lo))
}

fn collect(terrain: &Terrain, lo: usize, hi: usize) -> Vec<CellId> {
    (lo..=hi)
        .flat_map(|i| terrain.chunk(i).cells().iter().copied())
        .collect()
}
