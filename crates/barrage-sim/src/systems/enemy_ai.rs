//! Enemy AI system: runs the targeting decision and applies it.

use hecs::World;
use rand::Rng;

use barrage_ai::targeting::{decide, AiContext};
use barrage_core::enums::{Direction, Side};
use barrage_core::events::SimEvent;

use crate::level::Level;
use crate::world_setup::spawn_projectile;

/// Aim at the player's centre, fire if the decision says so, and return the
/// enemy's movement intent for this tick.
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    level: &mut Level,
    rng: &mut R,
    cell_size: f64,
    now: f64,
    events: &mut Vec<SimEvent>,
) -> Option<Direction> {
    let target = level.player.center();
    let enemy = &mut level.enemy;
    let profile = &level.enemy_profile;

    let ctx = AiContext {
        muzzle: enemy.muzzle(),
        target,
        speed: enemy.weapon.speed * cell_size,
        gravity: enemy.weapon.mass * cell_size,
        range: profile.range * cell_size,
        direct_hitter: profile.direct_hitter,
        imprecision: profile.imprecision,
        mobile: profile.mobile,
        ready: enemy.ready(now),
        cannon_angle: enemy.cannon_angle,
    };
    let decision = decide(&ctx, rng);
    enemy.cannon_angle = decision.cannon_angle;

    if decision.fire && enemy.try_fire(now) {
        spawn_projectile(world, enemy, 1.0, cell_size);
        events.push(SimEvent::ShotFired {
            side: Side::Enemy,
            weapon: None,
            angle: enemy.cannon_angle,
        });
        if enemy.reloading {
            tracing::debug!("enemy reloading");
            events.push(SimEvent::ReloadStarted { side: Side::Enemy });
        }
    }

    decision.movement
}
