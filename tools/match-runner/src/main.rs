//! match-runner: plays a scripted headless match and prints a JSON summary.
//!
//! Usage:
//!   match-runner --seed 7 --ticks 3600
//!   match-runner --config match.toml --snapshot

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process;

use serde::Serialize;

use barrage_core::commands::TickInput;
use barrage_core::config::SimConfig;
use barrage_core::enums::GamePhase;
use barrage_core::events::SimEvent;
use barrage_core::state::GameStateSnapshot;
use barrage_sim::SimulationEngine;

struct Args {
    config: Option<PathBuf>,
    seed: Option<u64>,
    ticks: u32,
    dt: f64,
    snapshot: bool,
}

#[derive(Serialize)]
struct Summary {
    ticks: u32,
    level: u32,
    shots_fired: u32,
    phase: GamePhase,
    events: BTreeMap<&'static str, u32>,
}

fn main() {
    init_tracing();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            print_usage();
            process::exit(1);
        }
    };

    let mut config = match &args.config {
        Some(path) => SimConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        }),
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut engine = SimulationEngine::new(config).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    let (summary, last) = run_match(&mut engine, &args);
    tracing::info!(
        ticks = summary.ticks,
        level = summary.level,
        shots = summary.shots_fired,
        phase = ?summary.phase,
        "match finished"
    );

    let output = if args.snapshot {
        serde_json::to_string_pretty(&last)
    } else {
        serde_json::to_string_pretty(&summary)
    };
    match output {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

fn print_usage() {
    eprintln!(
        "match-runner: headless BARRAGE match\n\
         \n\
           --config <path>  TOML sim config (default: built-in defaults)\n\
           --seed <N>       Override the config seed\n\
           --ticks <N>      Ticks to simulate (default: 3600)\n\
           --dt <S>         Seconds per tick (default: 1/60)\n\
           --snapshot       Print the final snapshot instead of the summary\n"
    );
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args {
        config: None,
        seed: None,
        ticks: 3600,
        dt: 1.0 / 60.0,
        snapshot: false,
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => parsed.config = Some(PathBuf::from(value(&mut args, &arg)?)),
            "--seed" => parsed.seed = Some(parse(&value(&mut args, &arg)?, &arg)?),
            "--ticks" => parsed.ticks = parse(&value(&mut args, &arg)?, &arg)?,
            "--dt" => parsed.dt = parse(&value(&mut args, &arg)?, &arg)?,
            "--snapshot" => parsed.snapshot = true,
            "help" | "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => return Err(format!("Unknown argument: {other}")),
        }
    }
    Ok(parsed)
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    args.next().ok_or_else(|| format!("{flag} needs a value"))
}

fn parse<T: std::str::FromStr>(text: &str, flag: &str) -> Result<T, String> {
    text.parse().map_err(|_| format!("invalid value for {flag}: {text}"))
}

/// Scripted player: aims at the enemy, fires about once a second, switches
/// weapon once after ten seconds.
fn run_match(engine: &mut SimulationEngine, args: &Args) -> (Summary, GameStateSnapshot) {
    let fire_every = ((1.0 / args.dt).round() as u32).max(1);
    let switch_at = fire_every * 10;
    let mut events = BTreeMap::new();
    let mut last = GameStateSnapshot::default();
    let mut ticks = 0;

    for tick in 0..args.ticks {
        let input = TickInput {
            dt: args.dt,
            cursor: Some(engine.level().enemy.center()),
            fire: tick % fire_every == 0,
            cycle_weapon: tick == switch_at,
            ..Default::default()
        };
        last = engine.tick(&input);
        ticks += 1;
        for event in &last.events {
            *events.entry(event_name(event)).or_insert(0) += 1;
        }
        if last.phase == GamePhase::GameOver {
            break;
        }
    }

    let summary = Summary {
        ticks,
        level: last.level,
        shots_fired: last.shots_fired,
        phase: last.phase,
        events,
    };
    (summary, last)
}

fn event_name(event: &SimEvent) -> &'static str {
    match event {
        SimEvent::ShotFired { .. } => "shot_fired",
        SimEvent::ProjectileRemoved { .. } => "projectile_removed",
        SimEvent::ExplosionResolved { .. } => "explosion_resolved",
        SimEvent::CombatantHit { .. } => "combatant_hit",
        SimEvent::WeaponSwitched { .. } => "weapon_switched",
        SimEvent::ReloadStarted { .. } => "reload_started",
        SimEvent::ReloadFinished { .. } => "reload_finished",
        SimEvent::CombatantDestroyed { .. } => "combatant_destroyed",
        SimEvent::LevelAdvanced { .. } => "level_advanced",
        SimEvent::Score(_) => "score",
    }
}
