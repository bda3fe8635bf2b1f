//! Narrow phase: projectiles against combatants and ground cells.
//!
//! Only the first touching cell is resolved per projectile per tick.

use hecs::World;

use barrage_core::components::Projectile;
use barrage_core::config::PhysicsConfig;
use barrage_core::constants::HIT_DAMAGE;
use barrage_core::enums::{PiercePolicy, Side};
use barrage_core::events::{ImpactKind, SimEvent};
use barrage_core::types::Aabb;
use barrage_terrain::{cells_near, circle_touches_rect, nearest_face, CellId, GroundCell, Terrain};

use super::ballistics::{bounce_off, reflect_off};
use super::cleanup::PendingChanges;
use crate::level::Level;
use crate::world_setup::new_explosion;

/// Resolve contacts for every projectile still in play.
pub fn run(
    world: &mut World,
    level: &mut Level,
    physics: &PhysicsConfig,
    pending: &mut PendingChanges,
    events: &mut Vec<SimEvent>,
) {
    for (entity, projectile) in world.query_mut::<&mut Projectile>() {
        if pending.is_removing(entity) {
            continue;
        }

        for side in [Side::Player, Side::Enemy] {
            let target = level.combatant_mut(side);
            if circle_touches_rect(projectile.position, projectile.radius * 2.0, &target.bounds) {
                if projectile.is_laser {
                    target.hit(HIT_DAMAGE);
                    events.push(SimEvent::CombatantHit {
                        side,
                        health: target.health,
                    });
                }
                pending.remove_projectile(entity, ImpactKind::Combatant);
            }
        }
        if pending.is_removing(entity) {
            continue;
        }

        if let Some((id, cell)) = first_touching_cell(&level.terrain, projectile) {
            match resolve_ground(projectile, cell, physics) {
                GroundOutcome::Absorbed => pending.remove_projectile(entity, ImpactKind::Bulletproof),
                GroundOutcome::Bounced => {}
                GroundOutcome::Stopped => pending.remove_projectile(entity, ImpactKind::Ground),
                GroundOutcome::Pierced { repeat, destroy_cell } => {
                    if repeat {
                        pending.new_explosions.push(new_explosion(
                            projectile.position,
                            projectile.effect_diameter,
                            projectile.owner,
                            physics.explosion_speed,
                        ));
                        if physics.pierce_policy == PiercePolicy::DetonateOnRepeat {
                            pending.remove_projectile(entity, ImpactKind::Ground);
                        }
                    }
                    if destroy_cell {
                        pending.remove_cell(id);
                    }
                }
            }
        }
    }
}

/// What a ground contact did to the projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundOutcome {
    /// Hit indestructible ground.
    Absorbed,
    /// Reflected or bounced; the projectile stays in play.
    Bounced,
    /// No drill left.
    Stopped,
    /// Drill spent on the cell.
    Pierced { repeat: bool, destroy_cell: bool },
}

/// Apply one ground contact to `projectile`.
///
/// Bulletproof cells win over every other flag. Reflective cells only
/// redirect lasers, elastic cells only bounce shells.
pub fn resolve_ground(projectile: &mut Projectile, cell: &GroundCell, physics: &PhysicsConfig) -> GroundOutcome {
    if cell.bulletproof {
        return GroundOutcome::Absorbed;
    }
    if projectile.is_laser && cell.reflective {
        let face = nearest_face(projectile.prev_position, &cell.bounds);
        reflect_off(projectile, face);
        tracing::trace!(?face, angle = projectile.angle, "laser reflected");
        return GroundOutcome::Bounced;
    }
    if !projectile.is_laser && cell.elastic {
        let face = nearest_face(projectile.prev_position, &cell.bounds);
        bounce_off(projectile, face, physics.elastic_damping);
        tracing::trace!(?face, speed = projectile.speed, "shell bounced");
        return GroundOutcome::Bounced;
    }
    if projectile.drill <= 0 {
        return GroundOutcome::Stopped;
    }
    projectile.drill -= 1;
    GroundOutcome::Pierced {
        repeat: projectile.repeat_explosions,
        destroy_cell: projectile.is_laser,
    }
}

fn first_touching_cell<'t>(terrain: &'t Terrain, projectile: &Projectile) -> Option<(CellId, &'t GroundCell)> {
    let r = projectile.radius;
    let bounds = Aabb::new(projectile.position.x - r, projectile.position.y - r, 2.0 * r, 2.0 * r);
    cells_near(terrain, &bounds, projectile.position.x - projectile.prev_position.x)
        .into_iter()
        .filter_map(|id| terrain.get(id).map(|cell| (id, cell)))
        .find(|(_, cell)| circle_touches_rect(projectile.position, r, &cell.bounds))
}
