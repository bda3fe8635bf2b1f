//! Runtime configuration for a match.
//!
//! Every field defaults to the corresponding constant in [`crate::constants`],
//! so a TOML file only needs the values it overrides. Terrain parameters left
//! unset are rolled from the engine RNG when a level is built.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::PiercePolicy;
use crate::error::ConfigError;
use crate::weapons::WeaponCatalog;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed + same inputs = same simulation.
    pub seed: u64,
    /// Edge length of one ground cell in world units.
    pub cell_size: f64,
    /// World height in cells.
    pub world_rows: u32,
    pub terrain: TerrainConfig,
    pub obstacles: ObstacleConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub physics: PhysicsConfig,
    pub weapons: WeaponCatalog,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            cell_size: DEFAULT_CELL_SIZE,
            world_rows: WORLD_ROWS,
            terrain: TerrainConfig::default(),
            obstacles: ObstacleConfig::default(),
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            physics: PhysicsConfig::default(),
            weapons: WeaponCatalog::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub chunk_size: u32,
    /// Fixed chunk count, or `None` to roll one per level.
    pub chunk_count: Option<u32>,
    pub amplitude: Option<u32>,
    pub frequency: Option<u32>,
    pub x_offset: Option<u32>,
    pub bulletproof_rows: u32,
    /// Chance per candidate column of a mirror pillar. 0 disables them.
    pub pillar_chance: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_count: None,
            amplitude: None,
            frequency: None,
            x_offset: None,
            bulletproof_rows: BULLETPROOF_ROWS,
            pillar_chance: PILLAR_CHANCE,
        }
    }
}

/// The level's gravity-well/wormhole obstacle. Distances in cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    pub enabled: bool,
    pub gravity: bool,
    pub wormhole: bool,
    pub radius: f64,
    pub effect_radius: f64,
    pub attraction: f64,
    pub repulsive: bool,
    pub bidirectional: bool,
    pub center_offset: f64,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            gravity: true,
            wormhole: true,
            radius: OBSTACLE_RADIUS,
            effect_radius: OBSTACLE_EFFECT_RADIUS,
            attraction: OBSTACLE_ATTRACTION,
            repulsive: false,
            bidirectional: true,
            center_offset: OBSTACLE_CENTER_OFFSET,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub health: f64,
    /// Cells per tick.
    pub speed: f64,
    /// Cells per tick.
    pub fall_rate: f64,
    pub size_cells: f64,
    /// Barrel length as a multiple of the combatant height.
    pub barrel: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            health: PLAYER_HEALTH,
            speed: PLAYER_SPEED,
            fall_rate: PLAYER_FALL_RATE,
            size_cells: COMBATANT_CELLS,
            barrel: PLAYER_BARREL,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Chance that a level's enemy walks toward the player when out of range.
    pub mobile_chance: f64,
    pub size_cells: f64,
    pub barrel: f64,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            mobile_chance: 0.0,
            size_cells: COMBATANT_CELLS,
            barrel: ENEMY_BARREL,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Speed retained after an elastic bounce.
    pub elastic_damping: f64,
    /// Ticks for an explosion to reach full size.
    pub explosion_speed: f64,
    pub pierce_policy: PiercePolicy,
    pub laser_trail_length: usize,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            elastic_damping: ELASTIC_DAMPING,
            explosion_speed: EXPLOSION_SPEED,
            pierce_policy: PiercePolicy::default(),
            laser_trail_length: LASER_TRAIL_LENGTH,
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), seed = config.seed, "loaded sim config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("cell_size", self.cell_size)?;
        positive("world_rows", self.world_rows as f64)?;
        positive("terrain.chunk_size", self.terrain.chunk_size as f64)?;
        if let Some(count) = self.terrain.chunk_count {
            positive("terrain.chunk_count", count as f64)?;
        }
        if let Some(frequency) = self.terrain.frequency {
            positive("terrain.frequency", frequency as f64)?;
        }
        unit_interval("terrain.pillar_chance", self.terrain.pillar_chance)?;
        unit_interval("enemy.mobile_chance", self.enemy.mobile_chance)?;
        positive("player.size_cells", self.player.size_cells)?;
        positive("enemy.size_cells", self.enemy.size_cells)?;
        positive("physics.explosion_speed", self.physics.explosion_speed)?;
        let damping = self.physics.elastic_damping;
        if !(damping > 0.0 && damping <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "physics.elastic_damping",
                expected: "in (0, 1]",
                value: damping,
            });
        }
        Ok(())
    }

    /// World width in world units for a level with `chunk_count` chunks.
    pub fn world_width(&self, chunk_count: u32) -> f64 {
        (chunk_count * self.terrain.chunk_size) as f64 * self.cell_size
    }

    pub fn world_height(&self) -> f64 {
        self.world_rows as f64 * self.cell_size
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            expected: "positive",
            value,
        })
    }
}

fn unit_interval(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            expected: "in [0, 1]",
            value,
        })
    }
}
