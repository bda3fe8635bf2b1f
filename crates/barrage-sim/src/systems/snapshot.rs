//! Snapshot system: builds a complete GameStateSnapshot from the world and level.
//!
//! This system is read-only. It never modifies the world.

use glam::DVec2;
use hecs::World;

use barrage_core::components::*;
use barrage_core::enums::GamePhase;
use barrage_core::events::SimEvent;
use barrage_core::state::*;
use barrage_core::types::SimTime;
use barrage_terrain::Terrain;

use crate::level::Level;

/// Per-tick values the snapshot needs besides the world and level.
pub struct SnapshotContext<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub shots_fired: u32,
    pub world_height: f64,
    pub aim_preview: &'a [DVec2],
}

pub fn build_snapshot(world: &World, level: &Level, ctx: SnapshotContext<'_>, events: Vec<SimEvent>) -> GameStateSnapshot {
    let now = ctx.time.elapsed_secs;
    let alive = ctx.phase == GamePhase::Active;
    GameStateSnapshot {
        time: ctx.time,
        phase: ctx.phase,
        level: level.number,
        shots_fired: ctx.shots_fired,
        world_width: level.width(),
        world_height: ctx.world_height,
        player: alive.then(|| level.player.view(now)),
        enemy: Some(level.enemy.view(now)),
        projectiles: build_projectiles(world),
        explosions: build_explosions(world),
        cells: build_cells(&level.terrain),
        obstacles: build_obstacles(world),
        aim_preview: ctx.aim_preview.to_vec(),
        events,
    }
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Projectile, Option<&PositionHistory>)>()
        .iter()
        .map(|(entity, (p, history))| ProjectileView {
            id: entity.to_bits().get(),
            position: p.position,
            radius: p.radius,
            is_laser: p.is_laser,
            trail: history.map(|h| h.positions.clone()).unwrap_or_default(),
        })
        .collect()
}

fn build_explosions(world: &World) -> Vec<ExplosionView> {
    world
        .query::<&Explosion>()
        .iter()
        .map(|(entity, e)| ExplosionView {
            id: entity.to_bits().get(),
            position: e.origin,
            radius: e.radius,
        })
        .collect()
}

/// Every live cell. A cell with nothing directly above it is a surface cell.
fn build_cells(terrain: &Terrain) -> Vec<CellView> {
    let cs = terrain.cell_size();
    terrain
        .iter()
        .map(|(id, cell)| CellView {
            id: id.0,
            bounds: cell.bounds,
            bulletproof: cell.bulletproof,
            reflective: cell.reflective,
            elastic: cell.elastic,
            surface: terrain.cell_at(cell.bounds.center() + DVec2::new(0.0, cs)).is_none(),
        })
        .collect()
}

fn build_obstacles(world: &World) -> Vec<ObstacleView> {
    world
        .query::<(&Obstacle, Option<&GravityWell>, Option<&Wormhole>)>()
        .iter()
        .map(|(entity, (_, well, hole))| ObstacleView {
            id: entity.to_bits().get(),
            position: well
                .map(|w| w.center)
                .or(hole.map(|h| h.entrance))
                .unwrap_or_default(),
            radius: hole.map_or(0.0, |h| h.radius),
            effect_radius: well.map(|w| w.effect_radius),
            repulsive: well.is_some_and(|w| w.repulsive),
            wormhole_exit: hole.map(|h| h.exit),
        })
        .collect()
}
