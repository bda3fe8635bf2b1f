//! Simulation constants and tuning parameters.
//!
//! Distances marked "cells" are multiplied by the configured cell size when a
//! level is built.

// --- World ---

/// Default edge length of one ground cell in world units.
pub const DEFAULT_CELL_SIZE: f64 = 10.0;

/// World height in cells.
pub const WORLD_ROWS: u32 = 50;

/// Width of one terrain chunk in cells.
pub const DEFAULT_CHUNK_SIZE: u32 = 2;

/// Rows at the bottom of every column that cannot be destroyed.
pub const BULLETPROOF_ROWS: u32 = 1;

/// Random chunk count range for generated levels.
pub const CHUNK_COUNT_MIN: u32 = 50;
pub const CHUNK_COUNT_MAX: u32 = 75;

/// Height profile amplitude range (cells).
pub const AMPLITUDE_MIN: u32 = 3;
pub const AMPLITUDE_MAX: u32 = 5;
/// Upper amplitude bound used when a level is regenerated after a win.
pub const AMPLITUDE_MAX_REGEN: u32 = 6;

/// Height profile frequency range (full periods across the world).
pub const FREQUENCY_MIN: u32 = 1;
pub const FREQUENCY_MAX: u32 = 3;

/// Added to the amplitude to get the baseline column height.
pub const BASE_HEIGHT: u32 = 10;

// --- Mirror pillars ---

/// Pillar candidates are every Nth column.
pub const PILLAR_COLUMN_STRIDE: u32 = 4;
/// Chance that a candidate column gets a pillar.
pub const PILLAR_CHANCE: f64 = 0.3;
/// Pillar height in cells.
pub const PILLAR_HEIGHT: u32 = 10;
/// Gap between the surface and the pillar's bottom cell (cells, inclusive range).
pub const PILLAR_GAP_MIN: u32 = 5;
pub const PILLAR_GAP_MAX: u32 = 7;

// --- Obstacles ---

/// Wormhole mouth radius (cells).
pub const OBSTACLE_RADIUS: f64 = 3.0;
/// Gravity well influence radius (cells).
pub const OBSTACLE_EFFECT_RADIUS: f64 = 10.0;
/// Gravity well strength (cells per tick per unit projectile mass).
pub const OBSTACLE_ATTRACTION: f64 = 3.0;
/// Horizontal/vertical offset of the obstacle mouths from the world centre (cells).
pub const OBSTACLE_CENTER_OFFSET: f64 = 10.0;

/// Distances are clamped to this before dividing.
pub const MIN_DISTANCE: f64 = 1.0;

// --- Projectiles & explosions ---

/// Speed retained after bouncing off an elastic cell.
pub const ELASTIC_DAMPING: f64 = 0.95;

/// Ticks an explosion takes to reach its full diameter.
pub const EXPLOSION_SPEED: f64 = 7.0;

/// Positions kept for a laser's trailing segment.
pub const LASER_TRAIL_LENGTH: usize = 5;

/// Charged-shot speed multiplier gained per second of holding fire.
pub const CHARGE_RATE: f64 = 0.5;

/// Aim preview dot count and spacing (ticks between dots).
pub const AIM_PREVIEW_DOTS: usize = 3;
pub const AIM_PREVIEW_STEP: u32 = 5;

// --- Combatants ---

/// Combatant edge length (cells).
pub const COMBATANT_CELLS: f64 = 2.0;

pub const PLAYER_HEALTH: f64 = 10.0;
/// Horizontal speed (cells per tick).
pub const PLAYER_SPEED: f64 = 0.2;
/// Fall rate (cells per tick).
pub const PLAYER_FALL_RATE: f64 = 0.3;
/// Barrel length as a multiple of combatant height.
pub const PLAYER_BARREL: f64 = 2.0;
pub const ENEMY_BARREL: f64 = 1.5;

/// Enemy spawn distance from the right edge (cells).
pub const ENEMY_EDGE_MARGIN: f64 = 10.0;

/// Cannon angle used when no firing solution exists (pointing left).
pub const FALLBACK_CANNON_ANGLE: f64 = std::f64::consts::PI;

/// Per-level growth of enemy stats.
pub const LEVEL_MULTIPLIER_STEP: f64 = 0.3;

/// Damage applied per hit (explosion overlap or laser contact).
pub const HIT_DAMAGE: f64 = 1.0;
