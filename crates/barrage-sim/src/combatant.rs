//! Shared tank/enemy entity and its ammo/reload state machine.
//!
//! `Ready(ammo > 0)` → fire → `Ready` or, at zero ammo, `Reloading` until the
//! deadline passes, then `Ready(max_ammo)`. `reloading` implies `ammo == 0`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use barrage_core::constants::{AIM_PREVIEW_DOTS, AIM_PREVIEW_STEP};
use barrage_core::enums::Side;
use barrage_core::state::CombatantView;
use barrage_core::types::{heading, Aabb};
use barrage_core::weapons::Weapon;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub side: Side,
    pub bounds: Aabb,
    pub health: f64,
    pub max_health: f64,
    pub ammo: u32,
    pub max_ammo: u32,
    pub reloading: bool,
    /// Sim time (seconds) at which the running reload completes.
    pub reload_deadline: f64,
    pub reload_time: f64,
    /// Sim time of the last shot, `None` before the first.
    pub last_shot: Option<f64>,
    pub cannon_angle: f64,
    /// Horizontal speed (world units per tick).
    pub speed: f64,
    /// Fall distance per tick.
    pub fall_rate: f64,
    /// Barrel length (world units), measured from the centre.
    pub barrel: f64,
    pub weapon: Weapon,
    pub weapon_index: Option<usize>,
}

impl Combatant {
    /// Fully loaded combatant. Movement stats start at zero.
    pub fn new(side: Side, bounds: Aabb, health: f64, weapon: Weapon, weapon_index: Option<usize>) -> Self {
        Self {
            side,
            bounds,
            health,
            max_health: health,
            ammo: weapon.ammo_capacity,
            max_ammo: weapon.ammo_capacity,
            reloading: false,
            reload_deadline: 0.0,
            reload_time: weapon.reload_time,
            last_shot: None,
            cannon_angle: 0.0,
            speed: 0.0,
            fall_rate: 0.0,
            barrel: bounds.height(),
            weapon,
            weapon_index,
        }
    }

    pub fn center(&self) -> DVec2 {
        self.bounds.center()
    }

    /// Tip of the barrel, where projectiles spawn.
    pub fn muzzle(&self) -> DVec2 {
        self.center() + heading(self.cannon_angle) * self.barrel
    }

    /// Point the cannon at `point`. A point at the centre leaves the angle unchanged.
    pub fn aim_at(&mut self, point: DVec2) {
        let offset = point - self.center();
        if offset != DVec2::ZERO {
            self.cannon_angle = offset.y.atan2(offset.x);
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn cooled_down(&self, now: f64) -> bool {
        self.last_shot
            .is_none_or(|last| now - last >= self.weapon.cooldown_secs())
    }

    /// Off cooldown, not reloading, and holding ammo.
    pub fn ready(&self, now: f64) -> bool {
        !self.reloading && self.ammo > 0 && self.cooled_down(now)
    }

    /// Spend one round if ready. Emptying the magazine starts a reload.
    pub fn try_fire(&mut self, now: f64) -> bool {
        if !self.ready(now) {
            return false;
        }
        self.ammo -= 1;
        self.last_shot = Some(now);
        if self.ammo == 0 {
            self.start_reload(now);
        }
        true
    }

    /// Enter `Reloading`. Returns `false` if a reload is already running.
    pub fn start_reload(&mut self, now: f64) -> bool {
        if self.reloading {
            return false;
        }
        self.reloading = true;
        self.ammo = 0;
        self.reload_deadline = now + self.reload_time;
        true
    }

    /// Refill once the deadline has passed. Returns `true` on the tick it completes.
    pub fn update_reload(&mut self, now: f64) -> bool {
        if self.reloading && now >= self.reload_deadline {
            self.reloading = false;
            self.ammo = self.max_ammo;
            return true;
        }
        false
    }

    /// Bind a new weapon and force a reload with its capacity and time.
    pub fn switch_weapon(&mut self, weapon: Weapon, index: Option<usize>, now: f64) {
        self.max_ammo = weapon.ammo_capacity;
        self.reload_time = weapon.reload_time;
        self.weapon = weapon;
        self.weapon_index = index;
        self.reloading = false;
        self.start_reload(now);
    }

    /// 0.0 when a reload starts, 1.0 once it completes or when not reloading.
    pub fn reload_progress(&self, now: f64) -> f64 {
        if !self.reloading || self.reload_time <= 0.0 {
            return 1.0;
        }
        let started = self.reload_deadline - self.reload_time;
        ((now - started) / self.reload_time).clamp(0.0, 1.0)
    }

    pub fn hit(&mut self, damage: f64) {
        self.health -= damage;
    }

    /// Predicted projectile positions for the current aim, nearest first.
    ///
    /// Dots are `AIM_PREVIEW_STEP` ticks apart along the launch parabola.
    pub fn aim_preview(&self, speed_multiplier: f64, cell_size: f64) -> Vec<DVec2> {
        let speed = self.weapon.speed * cell_size * speed_multiplier;
        let gravity = self.weapon.mass * cell_size;
        let direction = heading(self.cannon_angle);
        let muzzle = self.muzzle();
        (1..=AIM_PREVIEW_DOTS)
            .map(|i| {
                let t = (i as u32 * AIM_PREVIEW_STEP) as f64;
                muzzle + direction * speed * t - DVec2::new(0.0, 0.5 * gravity * t * t)
            })
            .collect()
    }

    pub fn view(&self, now: f64) -> CombatantView {
        CombatantView {
            side: self.side,
            bounds: self.bounds,
            cannon_angle: self.cannon_angle,
            health: self.health,
            max_health: self.max_health,
            ammo: self.ammo,
            max_ammo: self.max_ammo,
            reloading: self.reloading,
            reload_progress: self.reload_progress(now),
            weapon: self.weapon_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrage_core::weapons::WeaponCatalog;

    fn make_combatant() -> Combatant {
        let weapon = WeaponCatalog::default().get(0).clone();
        Combatant::new(Side::Player, Aabb::new(0.0, 0.0, 20.0, 20.0), 10.0, weapon, Some(0))
    }

    fn assert_ammo_invariant(c: &Combatant) {
        assert!(c.ammo <= c.max_ammo, "ammo {} > max {}", c.ammo, c.max_ammo);
        if c.reloading {
            assert_eq!(c.ammo, 0, "reloading with ammo left");
        }
    }

    #[test]
    fn test_empty_magazine_starts_reload() {
        let mut c = make_combatant();
        // Bullet: 5 rounds, 2 shots/s, 1 s reload.
        let mut now = 0.0;
        for _ in 0..5 {
            assert!(c.try_fire(now));
            assert_ammo_invariant(&c);
            now += 0.5;
        }
        assert!(c.reloading);
        assert_eq!(c.ammo, 0);
        assert_eq!(c.reload_deadline, 3.0);
        assert!(!c.try_fire(now), "cannot fire while reloading");

        assert!(!c.update_reload(2.9));
        assert_ammo_invariant(&c);
        assert!(c.update_reload(3.0));
        assert!(!c.reloading);
        assert_eq!(c.ammo, 5);
    }

    #[test]
    fn test_cooldown_gates_fire() {
        let mut c = make_combatant();
        assert!(c.try_fire(0.0));
        assert!(!c.try_fire(0.25), "0.5 s cooldown not elapsed");
        assert!(c.try_fire(0.5));
        assert_eq!(c.ammo, 3);
    }

    #[test]
    fn test_reload_while_reloading_is_noop() {
        let mut c = make_combatant();
        assert!(c.start_reload(0.0));
        let deadline = c.reload_deadline;
        assert!(!c.start_reload(0.5));
        assert_eq!(c.reload_deadline, deadline);
        assert_ammo_invariant(&c);
    }

    #[test]
    fn test_switch_weapon_forces_reload_with_new_capacity() {
        let mut c = make_combatant();
        let bombshell = WeaponCatalog::default().get(1).clone();
        c.switch_weapon(bombshell, Some(1), 2.0);
        assert!(c.reloading);
        assert_eq!(c.ammo, 0);
        assert_eq!(c.max_ammo, 30);
        assert_eq!(c.weapon_index, Some(1));
        assert!(c.update_reload(3.0));
        assert_eq!(c.ammo, 30);
    }

    #[test]
    fn test_reload_progress() {
        let mut c = make_combatant();
        assert_eq!(c.reload_progress(0.0), 1.0);
        c.start_reload(1.0);
        assert!((c.reload_progress(1.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_aim_and_muzzle() {
        let mut c = make_combatant();
        c.aim_at(DVec2::new(10.0, 100.0));
        assert!((c.cannon_angle - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        let muzzle = c.muzzle();
        assert!((muzzle - DVec2::new(10.0, 30.0)).length() < 1e-9);
    }

    #[test]
    fn test_aim_preview_follows_parabola() {
        let mut c = make_combatant();
        c.cannon_angle = 0.0;
        let dots = c.aim_preview(1.0, 10.0);
        assert_eq!(dots.len(), AIM_PREVIEW_DOTS);
        // Bullet: 20 units/tick, gravity 0.25; first dot 5 ticks out.
        let muzzle = c.muzzle();
        assert!((dots[0].x - (muzzle.x + 100.0)).abs() < 1e-9);
        assert!((dots[0].y - (muzzle.y - 0.5 * 0.25 * 25.0)).abs() < 1e-9);
        assert!(dots[2].y < dots[1].y && dots[1].y < dots[0].y);
    }
}
