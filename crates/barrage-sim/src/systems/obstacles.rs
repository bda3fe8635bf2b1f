//! Gravity wells and wormholes acting on projectiles.

use glam::DVec2;
use hecs::World;

use barrage_core::components::{GravityWell, Obstacle, Projectile, Wormhole};
use barrage_core::constants::MIN_DISTANCE;

/// Apply every obstacle to every projectile for one tick.
///
/// Wells push non-laser projectiles by a fixed offset scaled by their mass.
/// A well that is also a wormhole acts around the exit as well. Teleports
/// overwrite the position and leave the heading untouched.
pub fn run(world: &mut World) {
    let obstacles: Vec<(Option<GravityWell>, Option<Wormhole>)> = world
        .query::<(&Obstacle, Option<&GravityWell>, Option<&Wormhole>)>()
        .iter()
        .map(|(_, (_, well, hole))| (well.cloned(), hole.cloned()))
        .collect();
    if obstacles.is_empty() {
        return;
    }

    for (_entity, projectile) in world.query_mut::<&mut Projectile>() {
        for (well, hole) in &obstacles {
            if let Some(well) = well {
                if !projectile.is_laser {
                    projectile.position += pull(well, well.center, projectile);
                    if let Some(hole) = hole {
                        projectile.position += pull(well, hole.exit, projectile);
                    }
                }
            }
            if let Some(hole) = hole {
                teleport(hole, projectile);
            }
        }
    }
}

/// Offset a well centred at `center` applies to `projectile` this tick.
fn pull(well: &GravityWell, center: DVec2, projectile: &Projectile) -> DVec2 {
    let offset = center - projectile.position;
    let distance = offset.length().max(MIN_DISTANCE);
    if distance >= well.effect_radius {
        return DVec2::ZERO;
    }
    let direction = if well.repulsive { -1.0 } else { 1.0 };
    offset / distance * well.attraction * projectile.mass * direction
}

/// Move a projectile inside a mouth to just past the paired mouth.
///
/// The landing point is one radius diagonally from the mouth centre, outside
/// its trigger radius, so the projectile does not bounce straight back.
fn teleport(hole: &Wormhole, projectile: &mut Projectile) {
    let past = DVec2::splat(hole.radius);
    if projectile.position.distance(hole.entrance) < hole.radius {
        projectile.position = hole.exit + past;
    } else if hole.bidirectional && projectile.position.distance(hole.exit) < hole.radius {
        projectile.position = hole.entrance + past;
    }
}
