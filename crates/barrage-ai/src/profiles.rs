//! Level-scaled enemy profiles.
//!
//! Each level re-rolls the enemy's stats and weapon. Most stats grow with
//! the level multiplier, imprecision and shell weight shrink with it.

use rand::Rng;

use barrage_core::constants::LEVEL_MULTIPLIER_STEP;
use barrage_core::weapons::Weapon;

/// Rolled enemy parameters. Distances in cells, rates per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyProfile {
    /// Horizontal speed (cells per tick).
    pub speed: f64,
    /// Fall rate (cells per tick).
    pub fall_rate: f64,
    pub health: f64,
    /// Firing range (cells).
    pub range: f64,
    pub direct_hitter: bool,
    pub imprecision: f64,
    pub mobile: bool,
    pub weapon: Weapon,
}

/// `1 + 0.3 × level`.
pub fn level_multiplier(level: u32) -> f64 {
    1.0 + level as f64 * LEVEL_MULTIPLIER_STEP
}

impl EnemyProfile {
    /// Roll the enemy for `level`. `mobile_chance` is the probability the
    /// enemy walks toward the player when out of range.
    pub fn roll<R: Rng + ?Sized>(level: u32, mobile_chance: f64, rng: &mut R) -> Self {
        let lm = level_multiplier(level);

        let speed = rng.gen_range(1.0..4.0) * lm;
        let fall_rate = rng.gen_range(1.0..1.5) * lm;
        let health = rng.gen_range(1..=2) as f64 * lm;
        let range = rng.gen_range(200.0..300.0) * lm;
        let direct_hitter = rng.gen_bool(0.5);
        let imprecision = rng.gen_range(0.01..0.1) / lm;
        let mobile = rng.gen_bool(mobile_chance.clamp(0.0, 1.0));

        let weapon = Weapon {
            name: format!("enemy cannon L{level}"),
            speed: rng.gen_range(1.0..2.0),
            mass: rng.gen_range(0.0..0.1) / lm,
            effect_diameter: rng.gen_range(1..=3) as f64 * lm,
            fire_rate: rng.gen_range(0.1..0.5) * lm,
            reload_time: rng.gen_range(1.0..3.0) * lm,
            ammo_capacity: (rng.gen_range(20..=50) as f64 * lm).round() as u32,
            radius: rng.gen_range(0.3..0.8) * lm,
            drill: (rng.gen_range(0..=2) as f64 * lm).round() as i32,
            repeat_explosions: rng.gen_bool(0.5),
            is_laser: false,
        };

        Self {
            speed,
            fall_rate,
            health,
            range,
            direct_hitter,
            imprecision,
            mobile,
            weapon,
        }
    }
}
