//! Simulation engine: the per-tick clock of a match.
//!
//! `SimulationEngine` owns the hecs ECS world and the current level, applies
//! tick input, runs all systems and produces `GameStateSnapshot`s. Completely
//! headless, so identical seeds and inputs replay identically.

use glam::DVec2;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use barrage_core::commands::TickInput;
use barrage_core::config::SimConfig;
use barrage_core::constants::CHARGE_RATE;
use barrage_core::enums::{Direction, GamePhase, Side};
use barrage_core::error::ConfigError;
use barrage_core::events::{ScoreRecord, SimEvent};
use barrage_core::state::GameStateSnapshot;
use barrage_core::types::SimTime;

use crate::level::Level;
use crate::systems;
use crate::systems::cleanup::PendingChanges;
use crate::systems::snapshot::SnapshotContext;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    world: World,
    level: Level,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    /// Catalog index of the player's equipped weapon. Survives level changes.
    weapon_index: usize,
    shots_fired: u32,
    /// Movement the enemy AI chose last tick, applied at the start of this one.
    enemy_intent: Option<Direction>,
    pending: PendingChanges,
    events: Vec<SimEvent>,
    aim_preview: Vec<DVec2>,
}

impl SimulationEngine {
    /// Validate `config` and build level 0 from its seed.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut world = World::new();
        let level = world_setup::build_level(&mut world, &config, 0, 0, &mut rng);
        Ok(Self {
            config,
            world,
            level,
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng,
            weapon_index: 0,
            shots_fired: 0,
            enemy_intent: None,
            pending: PendingChanges::default(),
            events: Vec::new(),
            aim_preview: Vec::new(),
        })
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self, input: &TickInput) -> GameStateSnapshot {
        if self.phase == GamePhase::Active {
            self.time.advance(input.dt);
            self.pending.clear();
            self.apply_input(input);
            self.run_systems(input);
            self.resolve_outcome();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.level,
            SnapshotContext {
                time: self.time,
                phase: self.phase,
                shots_fired: self.shots_fired,
                world_height: self.config.world_height(),
                aim_preview: &self.aim_preview,
            },
            events,
        )
    }

    /// Equip catalog weapon `index` on the player and force a reload.
    ///
    /// # Panics
    ///
    /// If `index` is out of range for the configured catalog.
    pub fn select_weapon(&mut self, index: usize) {
        let weapon = self.config.weapons.get(index).clone();
        tracing::debug!(index, name = %weapon.name, "weapon switched");
        self.weapon_index = index;
        self.level
            .player
            .switch_weapon(weapon, Some(index), self.time.elapsed_secs);
        self.events.push(SimEvent::WeaponSwitched { index });
        self.events.push(SimEvent::ReloadStarted { side: Side::Player });
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn weapon_index(&self) -> usize {
        self.weapon_index
    }

    pub fn shots_fired(&self) -> u32 {
        self.shots_fired
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Player weapon switch, reload, aim and fire.
    fn apply_input(&mut self, input: &TickInput) {
        let now = self.time.elapsed_secs;

        if input.cycle_weapon {
            self.select_weapon(self.config.weapons.next_index(self.weapon_index));
        }

        let player = &mut self.level.player;
        if input.reload && player.start_reload(now) {
            tracing::debug!("player reloading");
            self.events.push(SimEvent::ReloadStarted { side: Side::Player });
        }
        if let Some(cursor) = input.cursor {
            player.aim_at(cursor);
        }

        let multiplier = input
            .charge_secs
            .map_or(1.0, |held| (held.max(0.0) * CHARGE_RATE).min(1.0));
        self.aim_preview = player.aim_preview(multiplier, self.config.cell_size);

        if input.fire && player.try_fire(now) {
            world_setup::spawn_projectile(&mut self.world, player, multiplier, self.config.cell_size);
            self.shots_fired += 1;
            self.events.push(SimEvent::ShotFired {
                side: Side::Player,
                weapon: Some(self.weapon_index),
                angle: player.cannon_angle,
            });
            if player.reloading {
                tracing::debug!("player reloading");
                self.events.push(SimEvent::ReloadStarted { side: Side::Player });
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, input: &TickInput) {
        let now = self.time.elapsed_secs;
        let width = self.level.width();
        let physics = &self.config.physics;

        // 1. Combatant movement (fall, step, climb)
        systems::movement::run(
            &self.level.terrain,
            &mut self.level.player,
            input.player_move.direction(),
            width,
        );
        systems::movement::run(&self.level.terrain, &mut self.level.enemy, self.enemy_intent, width);
        // 2. Enemy AI (aim, fire, next movement intent)
        self.enemy_intent = systems::enemy_ai::run(
            &mut self.world,
            &mut self.level,
            &mut self.rng,
            self.config.cell_size,
            now,
            &mut self.events,
        );
        let level = &mut self.level;
        // 3. Projectile integration and out-of-bounds
        systems::ballistics::run(
            &mut self.world,
            width,
            self.config.world_height(),
            physics.laser_trail_length,
            &mut self.pending,
        );
        // 4. Gravity wells and wormholes
        systems::obstacles::run(&mut self.world);
        // 5. Combatant and ground contacts
        systems::impacts::run(&mut self.world, level, physics, &mut self.pending, &mut self.events);
        // 6. Explosion growth and terminal damage pass
        systems::explosions::run(&mut self.world, level, &mut self.pending, &mut self.events);
        // 7. Cleanup (despawn, cell removal, new explosions)
        systems::cleanup::run(
            &mut self.world,
            &mut level.terrain,
            &mut self.pending,
            physics.explosion_speed,
            &mut self.events,
        );
        // 8. Reload timers
        for side in [Side::Player, Side::Enemy] {
            if level.combatant_mut(side).update_reload(now) {
                self.events.push(SimEvent::ReloadFinished { side });
            }
        }
    }

    /// Game over on player death, otherwise next level on enemy death.
    fn resolve_outcome(&mut self) {
        if !self.level.player.is_alive() {
            tracing::debug!(level = self.level.number, "player destroyed");
            self.events.push(SimEvent::CombatantDestroyed { side: Side::Player });
            self.events.push(SimEvent::Score(ScoreRecord {
                level: self.level.number,
                shots_fired: self.shots_fired,
            }));
            self.phase = GamePhase::GameOver;
            tracing::info!(level = self.level.number, shots = self.shots_fired, "game over");
            return;
        }

        if !self.level.enemy.is_alive() {
            tracing::debug!(level = self.level.number, "enemy destroyed");
            self.events.push(SimEvent::CombatantDestroyed { side: Side::Enemy });
            let number = self.level.number + 1;
            self.level = world_setup::build_level(
                &mut self.world,
                &self.config,
                number,
                self.weapon_index,
                &mut self.rng,
            );
            self.enemy_intent = None;
            self.events.push(SimEvent::LevelAdvanced { level: number });
            tracing::info!(level = number, "level advanced");
        }
    }
}
