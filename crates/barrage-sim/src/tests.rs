//! Tests for the simulation engine: determinism, match flow, weapons and the
//! projectile/explosion pipeline.

use glam::DVec2;

use barrage_core::commands::TickInput;
use barrage_core::components::{Explosion, Projectile};
use barrage_core::config::SimConfig;
use barrage_core::enums::*;
use barrage_core::events::{ImpactKind, ScoreRecord, SimEvent};
use barrage_core::state::GameStateSnapshot;

use crate::engine::SimulationEngine;
use crate::world_setup::new_explosion;

const DT: f64 = 1.0 / 60.0;

fn make_engine(seed: u64) -> SimulationEngine {
    SimulationEngine::new(SimConfig {
        seed,
        ..Default::default()
    })
    .unwrap()
}

fn idle() -> TickInput {
    TickInput {
        dt: DT,
        ..Default::default()
    }
}

/// Aim at the enemy and fire every `every` ticks.
fn scripted(engine: &SimulationEngine, tick: u32, every: u32) -> TickInput {
    TickInput {
        dt: DT,
        cursor: Some(engine.level().enemy.center()),
        fire: tick % every == 0,
        ..Default::default()
    }
}

/// Keep the enemy reloading forever so it never fires.
fn disarm_enemy(engine: &mut SimulationEngine) {
    let enemy = &mut engine.level_mut().enemy;
    enemy.start_reload(0.0);
    enemy.reload_deadline = f64::INFINITY;
}

/// Disarmed enemy that survives a few hits, with both combatants resting on the ground.
fn settled_target(engine: &mut SimulationEngine) {
    disarm_enemy(engine);
    engine.level_mut().enemy.health = 5.0;
    for _ in 0..120 {
        engine.tick(&idle());
    }
}

fn test_projectile(position: DVec2, owner: Side, is_laser: bool) -> Projectile {
    Projectile {
        position,
        prev_position: position,
        speed: 0.0,
        angle: 0.0,
        mass: 0.0,
        flight_time: 0,
        radius: 2.0,
        drill: 10,
        repeat_explosions: false,
        is_laser,
        effect_diameter: 30.0,
        owner,
    }
}

fn has_event(snapshot: &GameStateSnapshot, event: &SimEvent) -> bool {
    snapshot.events.iter().any(|e| e == event)
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = make_engine(12345);
    let mut engine_b = make_engine(12345);

    for tick in 0..300 {
        let snap_a = engine_a.tick(&scripted(&engine_a, tick, 60));
        let snap_b = engine_b.tick(&scripted(&engine_b, tick, 60));

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = make_engine(111);
    let mut engine_b = make_engine(222);

    let mut diverged = false;
    for _ in 0..60 {
        let json_a = serde_json::to_string(&engine_a.tick(&idle())).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick(&idle())).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce different levels");
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = SimConfig {
        cell_size: 0.0,
        ..Default::default()
    };
    assert!(SimulationEngine::new(config).is_err());
}

// ---- Combatant state ----

#[test]
fn test_ammo_invariant_holds_every_tick() {
    let mut engine = make_engine(7);
    for tick in 0..900 {
        let snapshot = engine.tick(&scripted(&engine, tick, 1));
        if snapshot.phase != GamePhase::Active {
            break;
        }
        for view in [&snapshot.player, &snapshot.enemy].into_iter().flatten() {
            assert!(view.ammo <= view.max_ammo, "{:?} ammo over capacity", view.side);
            if view.reloading {
                assert_eq!(view.ammo, 0, "{:?} reloading with ammo left", view.side);
            }
        }
    }
    assert!(engine.shots_fired() > 0);
}

#[test]
fn test_fire_emits_shot_and_spawns_projectile() {
    let mut engine = make_engine(3);
    disarm_enemy(&mut engine);

    let snapshot = engine.tick(&scripted(&engine, 0, 1));
    assert_eq!(snapshot.shots_fired, 1);
    // The shot is either in flight or already detonated against nearby ground.
    assert_eq!(snapshot.projectiles.len() + snapshot.explosions.len(), 1);
    assert!(snapshot.events.iter().any(|e| matches!(
        e,
        SimEvent::ShotFired {
            side: Side::Player,
            weapon: Some(0),
            ..
        }
    )));
    assert_eq!(snapshot.aim_preview.len(), 3);
}

#[test]
fn test_manual_reload() {
    let mut engine = make_engine(3);
    let snapshot = engine.tick(&TickInput {
        reload: true,
        ..idle()
    });
    let player = snapshot.player.as_ref().unwrap();
    assert!(player.reloading);
    assert_eq!(player.ammo, 0);
    assert!(has_event(&snapshot, &SimEvent::ReloadStarted { side: Side::Player }));
}

#[test]
fn test_enemy_moves_on_previous_tick_intent() {
    for seed in 0..8 {
        let mut engine = make_engine(seed);
        let x = engine.level().enemy.bounds.x();
        engine.tick(&idle());
        assert_eq!(
            engine.level().enemy.bounds.x(),
            x,
            "seed {seed}: enemy stepped before the AI chose a direction"
        );
    }
}

// ---- Weapons ----

#[test]
fn test_cycle_weapon_wraps_and_forces_reload() {
    let mut engine = make_engine(5);
    let catalog_len = engine.config().weapons.len();

    let snapshot = engine.tick(&TickInput {
        cycle_weapon: true,
        ..idle()
    });
    assert_eq!(engine.weapon_index(), 1);
    assert!(has_event(&snapshot, &SimEvent::WeaponSwitched { index: 1 }));
    let player = snapshot.player.unwrap();
    assert!(player.reloading);
    assert_eq!(player.weapon, Some(1));
    assert_eq!(player.max_ammo, engine.config().weapons.get(1).ammo_capacity);

    for _ in 1..catalog_len {
        engine.tick(&TickInput {
            cycle_weapon: true,
            ..idle()
        });
    }
    assert_eq!(engine.weapon_index(), 0);
}

#[test]
#[should_panic(expected = "out of range")]
fn test_select_weapon_out_of_range_panics() {
    let mut engine = make_engine(5);
    engine.select_weapon(99);
}

// ---- Projectiles & explosions ----

#[test]
fn test_out_of_bounds_projectile_is_removed() {
    let mut engine = make_engine(9);
    disarm_enemy(&mut engine);
    let entity = engine
        .world_mut()
        .spawn((test_projectile(DVec2::new(-50.0, 100.0), Side::Player, false),));

    let snapshot = engine.tick(&idle());
    assert!(!engine.world().contains(entity));
    assert!(snapshot.events.iter().any(|e| matches!(
        e,
        SimEvent::ProjectileRemoved {
            impact: ImpactKind::OutOfBounds,
            ..
        }
    )));
}

#[test]
fn test_laser_damages_combatant_on_contact() {
    let mut engine = make_engine(9);
    settled_target(&mut engine);
    let center = engine.level().enemy.center();
    let health = engine.level().enemy.health;
    engine
        .world_mut()
        .spawn((test_projectile(center, Side::Player, true),));

    let snapshot = engine.tick(&idle());
    let enemy = snapshot.enemy.unwrap();
    assert_eq!(enemy.health, health - 1.0);
    assert!(snapshot.explosions.is_empty(), "Lasers leave no explosion");
}

#[test]
fn test_shell_contact_detonates_and_explosion_damages_once() {
    let mut engine = make_engine(9);
    settled_target(&mut engine);
    let center = engine.level().enemy.center();
    let health = engine.level().enemy.health;
    engine
        .world_mut()
        .spawn((test_projectile(center, Side::Player, false),));

    let snapshot = engine.tick(&idle());
    assert!(snapshot.projectiles.is_empty());
    assert_eq!(snapshot.explosions.len(), 1);
    assert_eq!(snapshot.enemy.as_ref().unwrap().health, health);

    let mut hits = 0;
    for _ in 0..20 {
        let snapshot = engine.tick(&idle());
        hits += snapshot
            .events
            .iter()
            .filter(|e| matches!(e, SimEvent::CombatantHit { side: Side::Enemy, .. }))
            .count();
    }
    assert_eq!(hits, 1, "Explosion damage is applied in a single pass");
    assert_eq!(engine.level().enemy.health, health - 1.0);
}

#[test]
fn test_explosion_removes_cells_only_when_resolved() {
    let mut engine = make_engine(21);
    disarm_enemy(&mut engine);

    let cs = engine.config().cell_size;
    let column = 21.0;
    let origin = {
        let terrain = &engine.level().terrain;
        let top = terrain
            .iter()
            .filter(|(_, c)| c.bounds.x() == column * cs && !c.bulletproof && !c.elastic)
            .map(|(_, c)| c.bounds.center())
            .max_by(|a, b| a.y.total_cmp(&b.y));
        top.unwrap()
    };
    let before = engine.level().terrain.len();
    engine
        .world_mut()
        .spawn((new_explosion(origin, 3.0 * cs, Side::Player, 7.0),));

    let mut resolved_at = None;
    for tick in 0..20 {
        let snapshot = engine.tick(&idle());
        let destroyed = snapshot.events.iter().find_map(|e| match e {
            SimEvent::ExplosionResolved { cells_destroyed, .. } => Some(*cells_destroyed),
            _ => None,
        });
        match destroyed {
            Some(count) => {
                assert!(count > 0);
                assert_eq!(snapshot.cells.len(), before - count as usize);
                resolved_at = Some(tick);
                break;
            }
            None => assert_eq!(snapshot.cells.len(), before, "Cells removed before resolution"),
        }
    }
    assert_eq!(resolved_at, Some(4));

    let explosions = engine.world().query::<&Explosion>().iter().count();
    assert_eq!(explosions, 0);
}

#[test]
fn test_laser_reflects_off_generated_pillar() {
    let mut found = None;
    for seed in 0..16 {
        let mut config = SimConfig {
            seed,
            ..Default::default()
        };
        config.terrain.pillar_chance = 1.0;
        let mut engine = SimulationEngine::new(config).unwrap();
        disarm_enemy(&mut engine);
        let snapshot = engine.tick(&idle());

        let cs = engine.config().cell_size;
        let level = engine.level();
        let clear_of = |point: DVec2| {
            let obstacles = snapshot.obstacles.iter().all(|o| {
                let reach = o.radius + 5.0 * cs;
                point.distance(o.position) > reach
                    && o.wormhole_exit.map_or(true, |exit| point.distance(exit) > reach)
            });
            obstacles
                && point.distance(level.player.center()) > 5.0 * cs
                && point.distance(level.enemy.center()) > 5.0 * cs
        };
        let top = level
            .terrain
            .iter()
            .filter(|(_, c)| c.reflective)
            .map(|(_, c)| c.bounds)
            .find(|b| level.terrain.cell_at(b.center() + DVec2::new(0.0, cs)).is_none() && clear_of(b.center()));
        if let Some(bounds) = top {
            found = Some((engine, bounds));
            break;
        }
    }
    let (mut engine, bounds) = found.expect("no exposed pillar cell in any seed");

    let cells = engine.level().terrain.len();
    let start = DVec2::new(bounds.x() + 5.0, bounds.top() + 3.0);
    let laser = Projectile {
        speed: 4.0,
        angle: -std::f64::consts::FRAC_PI_2,
        ..test_projectile(start, Side::Player, true)
    };
    let entity = engine.world_mut().spawn((laser,));

    let snapshot = engine.tick(&idle());
    let laser = engine.world().get::<&Projectile>(entity).unwrap();
    assert!((laser.angle - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
    assert_eq!(laser.speed, 4.0);
    assert_eq!(laser.position, start);
    assert_eq!(snapshot.cells.len(), cells, "Mirror cells are not consumed");
}

// ---- Match flow ----

#[test]
fn test_enemy_destroyed_advances_level() {
    let mut engine = make_engine(13);
    engine.level_mut().enemy.health = 0.0;

    let snapshot = engine.tick(&idle());
    assert_eq!(snapshot.level, 1);
    assert_eq!(snapshot.phase, GamePhase::Active);
    assert!(has_event(&snapshot, &SimEvent::CombatantDestroyed { side: Side::Enemy }));
    assert!(has_event(&snapshot, &SimEvent::LevelAdvanced { level: 1 }));

    let enemy = snapshot.enemy.unwrap();
    assert!(enemy.health > 0.0);
    assert!(snapshot.projectiles.is_empty());
    assert_eq!(snapshot.world_width, engine.level().width());
}

#[test]
fn test_player_destroyed_ends_match_with_score() {
    let mut engine = make_engine(13);
    for tick in 0..3 {
        engine.tick(&scripted(&engine, tick, 1));
    }
    let shots = engine.shots_fired();
    engine.level_mut().player.health = 0.0;

    let snapshot = engine.tick(&idle());
    assert_eq!(snapshot.phase, GamePhase::GameOver);
    assert!(snapshot.player.is_none());
    assert!(has_event(&snapshot, &SimEvent::CombatantDestroyed { side: Side::Player }));
    assert!(has_event(
        &snapshot,
        &SimEvent::Score(ScoreRecord {
            level: 0,
            shots_fired: shots,
        })
    ));

    // GameOver ticks only rebuild the snapshot.
    let frozen = engine.time();
    let snapshot = engine.tick(&scripted(&engine, 0, 1));
    assert_eq!(snapshot.time, frozen);
    assert!(snapshot.events.is_empty());
    assert_eq!(engine.shots_fired(), shots);
}

#[test]
fn test_snapshot_marks_surface_cells() {
    let mut engine = make_engine(17);
    let snapshot = engine.tick(&idle());
    let columns = engine.level().terrain.columns() as usize;
    let surface = snapshot.cells.iter().filter(|c| c.surface).count();
    assert!(surface >= columns, "Every column has a top cell");
    assert_eq!(snapshot.obstacles.len(), 1);
    let obstacle = &snapshot.obstacles[0];
    assert!(obstacle.effect_radius.is_some());
    assert!(obstacle.wormhole_exit.is_some());
}
