//! Terrain: chunked arena of destructible ground cells.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use barrage_core::types::Aabb;

/// Stable handle to a ground cell. Never reused within one `Terrain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub u32);

/// Axis-aligned unit square of ground.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundCell {
    pub bounds: Aabb,
    /// Absorbs impacts and is never destroyed.
    pub bulletproof: bool,
    /// Reflects lasers.
    pub reflective: bool,
    /// Bounces physical shells.
    pub elastic: bool,
    /// Chunk this cell was filed under at creation.
    pub chunk: usize,
}

/// Capability flags for a new cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellFlags {
    pub bulletproof: bool,
    pub reflective: bool,
    pub elastic: bool,
}

/// Fixed-width slice of the x-axis, half-open `[x_lo, x_hi)`.
#[derive(Debug, Clone)]
pub struct TerrainChunk {
    pub index: usize,
    pub x_lo: f64,
    pub x_hi: f64,
    /// Non-owning references into the terrain's cell arena.
    cells: Vec<CellId>,
}

impl TerrainChunk {
    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }
}

/// Owns every ground cell. Chunks index into the same arena.
#[derive(Debug, Clone)]
pub struct Terrain {
    cell_size: f64,
    chunk_size: u32,
    chunks: Vec<TerrainChunk>,
    slots: Vec<Option<GroundCell>>,
    live: usize,
    /// Column heights the terrain was generated with (cells).
    heights: Vec<u32>,
}

impl Terrain {
    /// Empty terrain of `chunk_count` chunks, each `chunk_size` cells wide.
    pub fn new(cell_size: f64, chunk_size: u32, chunk_count: u32) -> Self {
        let chunk_width = chunk_size as f64 * cell_size;
        let chunks = (0..chunk_count as usize)
            .map(|index| TerrainChunk {
                index,
                x_lo: index as f64 * chunk_width,
                x_hi: (index + 1) as f64 * chunk_width,
                cells: Vec::new(),
            })
            .collect();
        Self {
            cell_size,
            chunk_size,
            chunks,
            slots: Vec::new(),
            live: 0,
            heights: Vec::new(),
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn chunk_width(&self) -> f64 {
        self.chunk_size as f64 * self.cell_size
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunk(&self, index: usize) -> &TerrainChunk {
        &self.chunks[index]
    }

    pub fn columns(&self) -> u32 {
        self.chunk_size * self.chunks.len() as u32
    }

    /// World width covered by the chunks.
    pub fn width(&self) -> f64 {
        self.columns() as f64 * self.cell_size
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn heights(&self) -> &[u32] {
        &self.heights
    }

    pub(crate) fn set_heights(&mut self, heights: Vec<u32>) {
        self.heights = heights;
    }

    /// Generated height of `column`, 0 outside the terrain.
    pub fn column_height(&self, column: usize) -> u32 {
        self.heights.get(column).copied().unwrap_or(0)
    }

    /// Chunk index for an x coordinate, clamped to the terrain.
    pub fn chunk_index_of(&self, x: f64) -> usize {
        if self.chunks.is_empty() {
            return 0;
        }
        let raw = (x / self.chunk_width()).floor();
        if raw <= 0.0 {
            0
        } else {
            (raw as usize).min(self.chunks.len() - 1)
        }
    }

    /// Add a cell whose bottom-left corner is at grid coordinates (`column`, `row`).
    pub fn insert(&mut self, column: u32, row: u32, flags: CellFlags) -> CellId {
        let chunk = ((column / self.chunk_size) as usize).min(self.chunks.len().saturating_sub(1));
        let bounds = Aabb::new(
            column as f64 * self.cell_size,
            row as f64 * self.cell_size,
            self.cell_size,
            self.cell_size,
        );
        let id = CellId(self.slots.len() as u32);
        self.slots.push(Some(GroundCell {
            bounds,
            bulletproof: flags.bulletproof,
            reflective: flags.reflective,
            elastic: flags.elastic,
            chunk,
        }));
        if let Some(c) = self.chunks.get_mut(chunk) {
            c.cells.push(id);
        }
        self.live += 1;
        id
    }

    pub fn get(&self, id: CellId) -> Option<&GroundCell> {
        self.slots.get(id.0 as usize).and_then(Option::as_ref)
    }

    pub fn contains(&self, id: CellId) -> bool {
        self.get(id).is_some()
    }

    /// Remove a cell from the arena and from its chunk in the same step.
    /// Returns `None` if it was already gone.
    pub fn remove(&mut self, id: CellId) -> Option<GroundCell> {
        let cell = self.slots.get_mut(id.0 as usize)?.take()?;
        if let Some(chunk) = self.chunks.get_mut(cell.chunk) {
            chunk.cells.retain(|&c| c != id);
        }
        self.live -= 1;
        Some(cell)
    }

    /// All live cells in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (CellId, &GroundCell)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|cell| (CellId(i as u32), cell)))
    }

    /// The cell containing `point`, if any.
    pub fn cell_at(&self, point: DVec2) -> Option<CellId> {
        let margin = self.cell_size * 1e-6;
        let lo = self.chunk_index_of(point.x - margin);
        let hi = self.chunk_index_of(point.x + margin);
        (lo..=hi)
            .flat_map(|i| self.chunks[i].cells.iter().copied())
            .find(|&id| self.get(id).is_some_and(|cell| cell.bounds.contains(point)))
    }
}
