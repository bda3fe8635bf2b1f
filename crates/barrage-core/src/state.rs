//! Game state snapshot: the complete visible state sent to the presentation layer each tick.
//!
//! Views are produced from simulation state and never feed back into it.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{GamePhase, Side};
use crate::events::SimEvent;
use crate::types::{Aabb, SimTime};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub level: u32,
    pub shots_fired: u32,
    pub world_width: f64,
    pub world_height: f64,
    pub player: Option<CombatantView>,
    pub enemy: Option<CombatantView>,
    pub projectiles: Vec<ProjectileView>,
    pub explosions: Vec<ExplosionView>,
    pub cells: Vec<CellView>,
    pub obstacles: Vec<ObstacleView>,
    /// Predicted dots for the player's current aim, nearest first.
    pub aim_preview: Vec<DVec2>,
    pub events: Vec<SimEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantView {
    pub side: Side,
    pub bounds: Aabb,
    pub cannon_angle: f64,
    pub health: f64,
    pub max_health: f64,
    pub ammo: u32,
    pub max_ammo: u32,
    pub reloading: bool,
    /// 0.0 at reload start, 1.0 when the magazine refills. 1.0 when not reloading.
    pub reload_progress: f64,
    /// Catalog index of the equipped weapon, `None` for a rolled enemy weapon.
    pub weapon: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    /// Stable render key (`hecs::Entity::to_bits`).
    pub id: u64,
    pub position: DVec2,
    pub radius: f64,
    pub is_laser: bool,
    /// Laser trailing segment, newest first. Empty for shells.
    pub trail: Vec<DVec2>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionView {
    pub id: u64,
    pub position: DVec2,
    pub radius: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellView {
    pub id: u32,
    pub bounds: Aabb,
    pub bulletproof: bool,
    pub reflective: bool,
    pub elastic: bool,
    /// Top cell of its column (drawn in the surface colour).
    pub surface: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u64,
    pub position: DVec2,
    pub radius: f64,
    pub effect_radius: Option<f64>,
    pub repulsive: bool,
    pub wormhole_exit: Option<DVec2>,
}
