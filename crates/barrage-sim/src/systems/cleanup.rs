//! Cleanup system: applies the removals and spawns queued during a tick.

use std::collections::HashSet;

use hecs::{Entity, World};

use barrage_core::components::{Explosion, Projectile};
use barrage_core::events::{ImpactKind, SimEvent};
use barrage_terrain::{CellId, Terrain};

use crate::world_setup::new_explosion;

/// Removals and spawns collected while systems iterate.
///
/// Nothing here touches the world until [`run`], so a pass never sees a
/// half-removed entity.
#[derive(Debug, Default)]
pub struct PendingChanges {
    /// Removal order, which is also event order.
    pub projectiles: Vec<(Entity, ImpactKind)>,
    removing: HashSet<Entity>,
    pub explosions: Vec<Entity>,
    pub cells: Vec<CellId>,
    pub new_explosions: Vec<Explosion>,
}

impl PendingChanges {
    /// Queue a projectile for removal. The first recorded cause wins.
    pub fn remove_projectile(&mut self, entity: Entity, impact: ImpactKind) {
        if self.removing.insert(entity) {
            self.projectiles.push((entity, impact));
        }
    }

    pub fn is_removing(&self, entity: Entity) -> bool {
        self.removing.contains(&entity)
    }

    pub fn remove_cell(&mut self, id: CellId) {
        if !self.cells.contains(&id) {
            self.cells.push(id);
        }
    }

    pub fn clear(&mut self) {
        self.projectiles.clear();
        self.removing.clear();
        self.explosions.clear();
        self.cells.clear();
        self.new_explosions.clear();
    }
}

/// Despawn queued projectiles (shells leave an explosion behind), finished
/// explosions and destroyed cells, then spawn the new explosions.
pub fn run(
    world: &mut World,
    terrain: &mut Terrain,
    pending: &mut PendingChanges,
    explosion_speed: f64,
    events: &mut Vec<SimEvent>,
) {
    pending.removing.clear();
    for (entity, impact) in pending.projectiles.drain(..) {
        let Some((position, is_laser, effect_diameter, owner)) = world
            .get::<&Projectile>(entity)
            .ok()
            .map(|p| (p.position, p.is_laser, p.effect_diameter, p.owner))
        else {
            continue;
        };
        if !is_laser {
            pending
                .new_explosions
                .push(new_explosion(position, effect_diameter, owner, explosion_speed));
        }
        tracing::trace!(?owner, ?impact, x = position.x, y = position.y, "projectile removed");
        events.push(SimEvent::ProjectileRemoved {
            owner,
            position,
            impact,
        });
        let _ = world.despawn(entity);
    }

    for entity in pending.explosions.drain(..) {
        let _ = world.despawn(entity);
    }

    for id in pending.cells.drain(..) {
        terrain.remove(id);
    }

    for explosion in pending.new_explosions.drain(..) {
        world.spawn((explosion,));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrage_core::enums::Side;
    use glam::DVec2;

    fn shell() -> Projectile {
        Projectile {
            position: DVec2::new(50.0, 50.0),
            prev_position: DVec2::new(50.0, 50.0),
            speed: 0.0,
            angle: 0.0,
            mass: 1.0,
            flight_time: 0,
            radius: 2.0,
            drill: 0,
            repeat_explosions: false,
            is_laser: false,
            effect_diameter: 30.0,
            owner: Side::Enemy,
        }
    }

    #[test]
    fn test_first_removal_cause_wins() {
        let mut world = World::new();
        let a = world.spawn((shell(),));
        let b = world.spawn((shell(),));
        let mut pending = PendingChanges::default();

        pending.remove_projectile(b, ImpactKind::Ground);
        pending.remove_projectile(a, ImpactKind::Combatant);
        pending.remove_projectile(b, ImpactKind::OutOfBounds);
        assert!(pending.is_removing(a));
        assert!(pending.is_removing(b));
        assert_eq!(pending.projectiles, vec![(b, ImpactKind::Ground), (a, ImpactKind::Combatant)]);

        pending.clear();
        assert!(!pending.is_removing(a));
        assert!(pending.projectiles.is_empty());
    }

    #[test]
    fn test_run_despawns_and_leaves_explosion_for_shells() {
        let mut world = World::new();
        let entity = world.spawn((shell(),));
        let mut terrain = Terrain::new(10.0, 2, 4);
        let mut pending = PendingChanges::default();
        let mut events = Vec::new();

        pending.remove_projectile(entity, ImpactKind::Ground);
        run(&mut world, &mut terrain, &mut pending, 7.0, &mut events);

        assert!(!world.contains(entity));
        assert!(!pending.is_removing(entity));
        assert_eq!(world.query::<&Explosion>().iter().count(), 1);
        assert_eq!(
            events,
            vec![SimEvent::ProjectileRemoved {
                owner: Side::Enemy,
                position: DVec2::new(50.0, 50.0),
                impact: ImpactKind::Ground,
            }]
        );
    }
}
