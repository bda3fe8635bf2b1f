//! Projectile trajectory integration.
//!
//! Explicit per-tick stepping: the horizontal component is constant and the
//! vertical drop grows with `flight_time`, tracing a parabola from the launch
//! (or last bounce) point.

use hecs::World;

use barrage_core::components::{PositionHistory, Projectile};
use barrage_core::enums::CellFace;
use barrage_core::events::ImpactKind;
use barrage_core::types::normalize_angle;
use barrage_terrain::mirror_angle;

use super::cleanup::PendingChanges;

/// Advance every projectile one tick and queue the ones leaving play.
///
/// Lasers burn one drill point per tick and are spent below 1. Out of bounds
/// is `x < 0`, `x > width`, `y < 0`, and for lasers also `y > height`.
pub fn run(world: &mut World, width: f64, height: f64, trail_length: usize, pending: &mut PendingChanges) {
    for (entity, (projectile, history)) in
        world.query_mut::<(&mut Projectile, Option<&mut PositionHistory>)>()
    {
        step(projectile);

        if let Some(history) = history {
            history.positions.insert(0, projectile.position);
            history.positions.truncate(trail_length);
        }

        if projectile.is_laser {
            projectile.drill -= 1;
            if projectile.drill < 1 {
                pending.remove_projectile(entity, ImpactKind::Spent);
            }
        }

        let p = projectile.position;
        let above = projectile.is_laser && p.y > height;
        if p.x < 0.0 || p.x > width || p.y < 0.0 || above {
            pending.remove_projectile(entity, ImpactKind::OutOfBounds);
        }
    }
}

/// One integration step. The previous centre is kept for rollback.
pub fn step(projectile: &mut Projectile) {
    projectile.prev_position = projectile.position;
    projectile.flight_time += 1;
    projectile.position.x += projectile.speed * projectile.angle.cos();
    projectile.position.y +=
        projectile.speed * projectile.angle.sin() - projectile.mass * projectile.flight_time as f64;
}

/// Mirror the launch angle about the struck face, wrapped into `(-π, π]`.
pub fn reflect(angle: f64, face: CellFace) -> f64 {
    normalize_angle(2.0 * mirror_angle(face) - angle)
}

/// Bounce off a reflective cell (lasers): new heading, speed kept.
pub fn reflect_off(projectile: &mut Projectile, face: CellFace) {
    projectile.angle = reflect(projectile.angle, face);
    projectile.position = projectile.prev_position;
}

/// Bounce off an elastic cell (shells): new heading, damped speed, and the
/// parabola restarts from the rollback point.
pub fn bounce_off(projectile: &mut Projectile, face: CellFace, damping: f64) {
    projectile.angle = reflect(projectile.angle, face);
    projectile.speed *= damping;
    projectile.flight_time = 0;
    projectile.position = projectile.prev_position;
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrage_core::enums::Side;
    use glam::DVec2;
    use std::f64::consts::{FRAC_PI_4, PI};

    fn make_projectile(angle: f64, speed: f64, mass: f64) -> Projectile {
        Projectile {
            position: DVec2::new(100.0, 100.0),
            prev_position: DVec2::new(100.0, 100.0),
            speed,
            angle,
            mass,
            flight_time: 0,
            radius: 2.0,
            drill: 0,
            repeat_explosions: false,
            is_laser: false,
            effect_diameter: 10.0,
            owner: Side::Player,
        }
    }

    #[test]
    fn test_step_accumulates_drop() {
        let mut p = make_projectile(0.0, 10.0, 1.0);
        step(&mut p);
        assert_eq!(p.prev_position, DVec2::new(100.0, 100.0));
        assert_eq!(p.position, DVec2::new(110.0, 99.0));
        step(&mut p);
        assert_eq!(p.position, DVec2::new(120.0, 97.0));
        assert_eq!(p.flight_time, 2);
    }

    #[test]
    fn test_reflection_per_face() {
        // Heading down-right onto a top face comes back up-right.
        assert!((reflect(-FRAC_PI_4, CellFace::Top) - FRAC_PI_4).abs() < 1e-12);
        // Heading right into a left face comes back heading left.
        assert!((reflect(0.0, CellFace::Left) - PI).abs() < 1e-12);
        // Up-left into a right face becomes up-right.
        assert!((reflect(3.0 * FRAC_PI_4, CellFace::Right) - FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn test_laser_reflection_keeps_speed() {
        let mut p = make_projectile(-FRAC_PI_4, 10.0, 0.0);
        p.is_laser = true;
        step(&mut p);
        reflect_off(&mut p, CellFace::Top);
        assert_eq!(p.speed, 10.0);
        assert_eq!(p.position, p.prev_position);
        assert_eq!(p.flight_time, 1);
    }

    #[test]
    fn test_elastic_bounce_damps_and_resets_flight() {
        let mut p = make_projectile(-FRAC_PI_4, 10.0, 0.5);
        step(&mut p);
        step(&mut p);
        bounce_off(&mut p, CellFace::Top, 0.95);
        assert!((p.speed - 9.5).abs() < 1e-12);
        assert_eq!(p.flight_time, 0);
        assert!((p.angle - FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_bounds_and_spent_lasers_are_queued() {
        let mut world = World::new();
        let mut pending = PendingChanges::default();

        let mut falling = make_projectile(-PI / 2.0, 200.0, 0.0);
        falling.position = DVec2::new(50.0, 10.0);
        let falling = world.spawn((falling,));

        let mut laser = make_projectile(0.0, 1.0, 0.0);
        laser.is_laser = true;
        laser.drill = 2;
        let laser = world.spawn((laser, PositionHistory::default()));

        run(&mut world, 500.0, 500.0, 5, &mut pending);
        assert_eq!(pending.projectiles, vec![(falling, ImpactKind::OutOfBounds)]);

        run(&mut world, 500.0, 500.0, 5, &mut pending);
        assert!(pending.projectiles.contains(&(laser, ImpactKind::Spent)));

        let history = world.get::<&PositionHistory>(laser).unwrap();
        assert_eq!(history.positions.len(), 2);
        assert_eq!(history.positions[0], DVec2::new(102.0, 100.0));
    }
}
