//! Explosion growth and the one-time area damage pass.

use hecs::World;

use barrage_core::components::Explosion;
use barrage_core::constants::HIT_DAMAGE;
use barrage_core::enums::Side;
use barrage_core::events::SimEvent;
use barrage_terrain::{cells_in_span, circle_touches_rect};

use super::cleanup::PendingChanges;
use crate::level::Level;

/// Grow each explosion by its step until it reaches full size, then resolve it.
///
/// Damage is applied once, on the tick the explosion is queued for removal:
/// one hit to each overlapped combatant, and every overlapped cell that is
/// neither bulletproof nor elastic is queued for destruction.
pub fn run(world: &mut World, level: &mut Level, pending: &mut PendingChanges, events: &mut Vec<SimEvent>) {
    for (entity, explosion) in world.query_mut::<&mut Explosion>() {
        if explosion.radius * 2.0 < explosion.effect_diameter {
            explosion.radius += explosion.radius_step;
            continue;
        }
        pending.explosions.push(entity);

        let reach = explosion.radius * 2.0;
        for side in [Side::Player, Side::Enemy] {
            let target = level.combatant_mut(side);
            if circle_touches_rect(explosion.origin, reach, &target.bounds) {
                target.hit(HIT_DAMAGE);
                events.push(SimEvent::CombatantHit {
                    side,
                    health: target.health,
                });
            }
        }

        let terrain = &level.terrain;
        let mut destroyed = 0u32;
        for id in cells_in_span(terrain, explosion.origin.x - explosion.radius, explosion.origin.x + explosion.radius) {
            let Some(cell) = terrain.get(id) else { continue };
            if cell.bulletproof || cell.elastic {
                continue;
            }
            if circle_touches_rect(explosion.origin, reach, &cell.bounds) {
                pending.remove_cell(id);
                destroyed += 1;
            }
        }

        tracing::trace!(x = explosion.origin.x, y = explosion.origin.y, destroyed, "explosion resolved");
        events.push(SimEvent::ExplosionResolved {
            position: explosion.origin,
            cells_destroyed: destroyed,
        });
    }
}
