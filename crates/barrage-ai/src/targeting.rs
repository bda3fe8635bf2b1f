//! Per-tick enemy decision.
//!
//! Pure function over plain data. The caller owns the enemy state and
//! applies the decision (aim, fire, move).

use glam::DVec2;
use rand::Rng;

use barrage_core::constants::FALLBACK_CANNON_ANGLE;
use barrage_core::enums::Direction;

use crate::solver::{firing_angle, is_vertical};

/// Input to the targeting decision for one tick. World units.
pub struct AiContext {
    /// Where the projectile would leave the barrel.
    pub muzzle: DVec2,
    pub target: DVec2,
    /// Projectile launch speed (per tick).
    pub speed: f64,
    /// Projectile gravity coefficient.
    pub gravity: f64,
    pub range: f64,
    pub direct_hitter: bool,
    /// Bound of the uniform angle perturbation (radians).
    pub imprecision: f64,
    pub mobile: bool,
    /// Off cooldown and not reloading.
    pub ready: bool,
    pub cannon_angle: f64,
}

/// Output of the targeting decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiDecision {
    pub cannon_angle: f64,
    pub fire: bool,
    pub movement: Option<Direction>,
}

/// Aim and fire when the target is in range and the weapon is ready,
/// otherwise walk toward it if mobile.
pub fn decide<R: Rng + ?Sized>(ctx: &AiContext, rng: &mut R) -> AiDecision {
    let hold = AiDecision {
        cannon_angle: ctx.cannon_angle,
        fire: false,
        movement: None,
    };

    let offset = ctx.target - ctx.muzzle;
    if offset.length() <= ctx.range && ctx.ready {
        let Some(mut angle) = firing_angle(ctx.muzzle, ctx.target, ctx.speed, ctx.gravity, ctx.direct_hitter) else {
            return AiDecision {
                cannon_angle: FALLBACK_CANNON_ANGLE,
                ..hold
            };
        };
        if !is_vertical(ctx.muzzle, ctx.target, ctx.gravity) && ctx.imprecision > 0.0 {
            angle += rng.gen_range(-ctx.imprecision..=ctx.imprecision);
        }
        return AiDecision {
            cannon_angle: angle,
            fire: true,
            movement: None,
        };
    }

    if ctx.mobile {
        let direction = if offset.x < 0.0 {
            Direction::Left
        } else {
            Direction::Right
        };
        return AiDecision {
            movement: Some(direction),
            ..hold
        };
    }

    hold
}
