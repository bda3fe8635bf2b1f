//! Level and entity spawn factories.
//!
//! Builds the terrain and combatants for a level and spawns projectile,
//! explosion and obstacle entities with their component bundles.

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;

use barrage_ai::profiles::EnemyProfile;
use barrage_core::components::*;
use barrage_core::config::SimConfig;
use barrage_core::constants::*;
use barrage_core::enums::Side;
use barrage_core::types::Aabb;
use barrage_terrain::{generate, Terrain, TerrainParams};

use crate::combatant::Combatant;
use crate::level::Level;

/// Build level `number` and respawn its obstacles into `world`.
///
/// The world is cleared first: no projectile or explosion survives a level change.
pub fn build_level<R: Rng + ?Sized>(
    world: &mut World,
    config: &SimConfig,
    number: u32,
    weapon_index: usize,
    rng: &mut R,
) -> Level {
    world.clear();

    let params = TerrainParams::random(rng, &config.terrain, number > 0);
    let terrain = generate(&params, config.cell_size, &config.terrain, rng);
    let tallest = terrain.heights().iter().copied().max().unwrap_or(0);
    if tallest >= config.world_rows {
        tracing::warn!(tallest, rows = config.world_rows, "terrain reaches the top of the world");
    }

    let player = spawn_player(config, &terrain, weapon_index);
    let enemy_profile = EnemyProfile::roll(number, config.enemy.mobile_chance, rng);
    let enemy = spawn_enemy(config, &terrain, &enemy_profile);

    if config.obstacles.enabled && (config.obstacles.gravity || config.obstacles.wormhole) {
        spawn_obstacle(world, config, &params);
    }

    tracing::info!(
        level = number,
        width = terrain.width(),
        enemy_health = enemy.health,
        direct_hitter = enemy_profile.direct_hitter,
        "level ready"
    );

    Level {
        number,
        params,
        terrain,
        player,
        enemy,
        enemy_profile,
    }
}

/// Highest column under `[x, x + width)`, in cells.
fn surface_under(terrain: &Terrain, x: f64, width: f64) -> u32 {
    let cs = terrain.cell_size();
    let first = (x / cs).floor().max(0.0) as usize;
    let last = ((x + width) / cs).ceil().max(1.0) as usize - 1;
    (first..=last).map(|c| terrain.column_height(c)).max().unwrap_or(0)
}

/// Player tank at column 1, one cell above the ground under it.
pub fn spawn_player(config: &SimConfig, terrain: &Terrain, weapon_index: usize) -> Combatant {
    let cs = config.cell_size;
    let size = config.player.size_cells * cs;
    let x = cs;
    let y = (surface_under(terrain, x, size) + 1) as f64 * cs;

    let weapon = config.weapons.get(weapon_index).clone();
    let mut player = Combatant::new(
        Side::Player,
        Aabb::new(x, y, size, size),
        config.player.health,
        weapon,
        Some(weapon_index),
    );
    player.speed = config.player.speed * cs;
    player.fall_rate = config.player.fall_rate * cs;
    player.barrel = config.player.barrel * size;
    player
}

/// Enemy `ENEMY_EDGE_MARGIN` cells from the right edge, two cells above the ground.
pub fn spawn_enemy(config: &SimConfig, terrain: &Terrain, profile: &EnemyProfile) -> Combatant {
    let cs = config.cell_size;
    let size = config.enemy.size_cells * cs;
    let x = (terrain.width() - ENEMY_EDGE_MARGIN * cs - size).max(0.0);
    let y = (surface_under(terrain, x, size) + 2) as f64 * cs;

    let mut enemy = Combatant::new(
        Side::Enemy,
        Aabb::new(x, y, size, size),
        profile.health,
        profile.weapon.clone(),
        None,
    );
    enemy.speed = profile.speed * cs;
    enemy.fall_rate = profile.fall_rate * cs;
    enemy.barrel = config.enemy.barrel * size;
    enemy.cannon_angle = FALLBACK_CANNON_ANGLE;
    enemy
}

/// One combined gravity well / wormhole above the world centre.
pub fn spawn_obstacle(world: &mut World, config: &SimConfig, params: &TerrainParams) -> Entity {
    let cs = config.cell_size;
    let o = &config.obstacles;
    let mid = DVec2::new(params.columns() as f64 / 2.0, config.world_rows as f64 / 2.0);
    let entrance = (mid + DVec2::new(o.center_offset, o.center_offset)) * cs;
    let exit = (mid + DVec2::new(-o.center_offset, o.center_offset)) * cs;

    let mut builder = hecs::EntityBuilder::new();
    builder.add(Obstacle);
    if o.gravity {
        builder.add(GravityWell {
            center: entrance,
            effect_radius: o.effect_radius * cs,
            attraction: o.attraction * cs,
            repulsive: o.repulsive,
        });
    }
    if o.wormhole {
        builder.add(Wormhole {
            entrance,
            exit,
            radius: o.radius * cs,
            bidirectional: o.bidirectional,
        });
    }
    world.spawn(builder.build())
}

/// Fire a projectile from `shooter`'s muzzle with its bound weapon.
///
/// Weapon stats are in cells and scaled to world units here. Lasers carry a
/// `PositionHistory` for their trailing segment.
pub fn spawn_projectile(world: &mut World, shooter: &Combatant, speed_multiplier: f64, cell_size: f64) -> Entity {
    let weapon = &shooter.weapon;
    let position = shooter.muzzle();
    let projectile = Projectile {
        position,
        prev_position: position,
        speed: weapon.speed * cell_size * speed_multiplier,
        angle: shooter.cannon_angle,
        mass: weapon.mass * cell_size,
        flight_time: 0,
        radius: weapon.radius * cell_size,
        drill: weapon.drill,
        repeat_explosions: weapon.repeat_explosions,
        is_laser: weapon.is_laser,
        effect_diameter: weapon.effect_diameter * cell_size,
        owner: shooter.side,
    };
    if projectile.is_laser {
        world.spawn((projectile, PositionHistory::default()))
    } else {
        world.spawn((projectile,))
    }
}

/// A zero-radius explosion that reaches `effect_diameter` in `explosion_speed` ticks.
pub fn new_explosion(origin: DVec2, effect_diameter: f64, owner: Side, explosion_speed: f64) -> Explosion {
    Explosion {
        origin,
        effect_diameter,
        radius: 0.0,
        radius_step: effect_diameter / explosion_speed,
        owner,
    }
}

