//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::Side;

/// Ballistic entity fired by a combatant. Units are world units and ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Centre of the projectile.
    pub position: DVec2,
    /// Centre before the last integration step (bounce rollback, travel direction).
    pub prev_position: DVec2,
    /// Launch speed along `angle` (world units per tick).
    pub speed: f64,
    /// Launch angle in radians.
    pub angle: f64,
    /// Gravity coefficient: the parabola drops `mass * flight_time` per tick.
    pub mass: f64,
    /// Ticks since launch or since the last elastic bounce.
    pub flight_time: u32,
    pub radius: f64,
    /// Remaining pierce count.
    pub drill: i32,
    pub repeat_explosions: bool,
    pub is_laser: bool,
    /// Diameter of the explosion this projectile spawns.
    pub effect_diameter: f64,
    pub owner: Side,
}

/// Growing area-of-effect damage source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub origin: DVec2,
    /// Maximum diameter. The explosion resolves once `radius * 2 >= effect_diameter`.
    pub effect_diameter: f64,
    /// Current radius, never decreases.
    pub radius: f64,
    /// Per-tick growth.
    pub radius_step: f64,
    pub owner: Side,
}

/// Attracts (or repels) non-laser projectiles within `effect_radius`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GravityWell {
    pub center: DVec2,
    pub effect_radius: f64,
    pub attraction: f64,
    pub repulsive: bool,
}

/// Paired mouths; a projectile entering one is moved to the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wormhole {
    pub entrance: DVec2,
    pub exit: DVec2,
    /// Mouth radius: teleport triggers when a projectile centre is closer than this.
    pub radius: f64,
    /// Whether the exit also teleports back to the entrance.
    pub bidirectional: bool,
}

/// Recent positions, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PositionHistory {
    pub positions: Vec<DVec2>,
}

/// Marks an obstacle entity (gravity well, wormhole, or both).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle;
