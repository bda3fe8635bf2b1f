//! Height-profile terrain generation.
//!
//! A level's ground is a sine profile sampled once per column, filled from
//! row 0 up to the column height. Optional mirror pillars float above the
//! surface at regular column intervals.

use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use barrage_core::config::TerrainConfig;
use barrage_core::constants::*;

use crate::grid::{CellFlags, Terrain};

/// Parameters of one generated level. Deterministic given the same values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainParams {
    /// Chunk width in cells.
    pub chunk_size: u32,
    pub chunk_count: u32,
    pub amplitude: u32,
    /// Full sine periods across the world.
    pub frequency: u32,
    /// Phase shift in columns.
    pub x_offset: u32,
    /// Baseline column height in cells.
    pub y_offset: u32,
}

impl TerrainParams {
    /// Roll the parameters a config leaves unset.
    ///
    /// `regenerate` widens the amplitude range, as used for every level after
    /// the first.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, config: &TerrainConfig, regenerate: bool) -> Self {
        let chunk_count = config
            .chunk_count
            .unwrap_or_else(|| rng.gen_range(CHUNK_COUNT_MIN..=CHUNK_COUNT_MAX));
        let amplitude_max = if regenerate {
            AMPLITUDE_MAX_REGEN
        } else {
            AMPLITUDE_MAX
        };
        let amplitude = config
            .amplitude
            .unwrap_or_else(|| rng.gen_range(AMPLITUDE_MIN..=amplitude_max));
        let frequency = config
            .frequency
            .unwrap_or_else(|| rng.gen_range(FREQUENCY_MIN..=FREQUENCY_MAX))
            .max(1);
        let columns = config.chunk_size * chunk_count;
        let x_offset = config
            .x_offset
            .unwrap_or_else(|| rng.gen_range(0..=columns / frequency));
        Self {
            chunk_size: config.chunk_size,
            chunk_count,
            amplitude,
            frequency,
            x_offset,
            y_offset: amplitude + BASE_HEIGHT,
        }
    }

    pub fn columns(&self) -> u32 {
        self.chunk_size * self.chunk_count
    }

    /// Column heights in cells, one per column.
    pub fn heights(&self) -> Vec<u32> {
        let columns = self.columns();
        if columns == 0 {
            return Vec::new();
        }
        (0..columns)
            .map(|x| {
                let phase = (x + self.x_offset) as f64 * TAU / columns as f64 * self.frequency as f64;
                let h = (phase.sin() * self.amplitude as f64 + self.y_offset as f64).round();
                h.max(0.0) as u32
            })
            .collect()
    }
}

/// Build the ground for `params`.
///
/// Rows below `config.bulletproof_rows` are indestructible. Pillar cells are
/// both reflective and elastic.
pub fn generate<R: Rng + ?Sized>(
    params: &TerrainParams,
    cell_size: f64,
    config: &TerrainConfig,
    rng: &mut R,
) -> Terrain {
    let mut terrain = Terrain::new(cell_size, params.chunk_size, params.chunk_count);
    let heights = params.heights();

    for (column, &height) in heights.iter().enumerate() {
        for row in 0..height {
            let flags = CellFlags {
                bulletproof: row < config.bulletproof_rows,
                ..CellFlags::default()
            };
            terrain.insert(column as u32, row, flags);
        }
    }

    let mut pillars = 0u32;
    if config.pillar_chance > 0.0 {
        let mirror = CellFlags {
            reflective: true,
            elastic: true,
            ..CellFlags::default()
        };
        let chance = config.pillar_chance.min(1.0);
        for (column, &height) in heights.iter().enumerate() {
            let column = column as u32;
            if column == 0 || column % PILLAR_COLUMN_STRIDE != 0 {
                continue;
            }
            if !rng.gen_bool(chance) {
                continue;
            }
            let base = height + rng.gen_range(PILLAR_GAP_MIN..=PILLAR_GAP_MAX);
            for row in base..base + PILLAR_HEIGHT {
                terrain.insert(column, row, mirror);
            }
            pillars += 1;
        }
    }

    terrain.set_heights(heights);
    tracing::info!(
        columns = params.columns(),
        cells = terrain.len(),
        pillars,
        amplitude = params.amplitude,
        frequency = params.frequency,
        "generated terrain"
    );
    terrain
}
