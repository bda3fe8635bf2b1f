//! Ballistic firing solution.
//!
//! Trajectories follow `x = v·cos(θ)·t`, `y = v·sin(θ)·t - g·t²/2`. Solving
//! for θ through a target gives two roots: the flat (direct) one and the
//! lobbed one.

use std::f64::consts::FRAC_PI_2;

use glam::DVec2;

/// Launch angle from `start` that passes through `target`.
///
/// Returns `None` when the target is out of reach for `speed` under `gravity`
/// (negative discriminant). `direct` picks the lower root.
pub fn firing_angle(start: DVec2, target: DVec2, speed: f64, gravity: f64, direct: bool) -> Option<f64> {
    let x = target.x - start.x;
    let y = target.y - start.y;

    // Without gravity the shot is a straight line.
    if gravity == 0.0 {
        return Some(y.atan2(x));
    }

    let v2 = speed * speed;
    let discriminant = v2 * v2 - gravity * (gravity * x * x + 2.0 * y * v2);
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let numerator = if direct { v2 - root } else { v2 + root };
    let denominator = gravity * x;
    if denominator == 0.0 {
        return Some(if numerator > 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 });
    }
    Some(numerator.atan2(denominator))
}

/// `true` when the solution is a straight-up or straight-down shot.
pub fn is_vertical(start: DVec2, target: DVec2, gravity: f64) -> bool {
    gravity != 0.0 && gravity * (target.x - start.x) == 0.0
}
