//! horde-run: headless session runner.
//!
//! Usage:
//!   horde-run [--config game.json] [--seed N] [--ticks N]
//!
//! The protagonist stands still and shoots the nearest live agent once per
//! second. Lifecycle and combat events are printed to stdout as JSON lines,
//! followed by a final summary. Logs go to stderr; set `RUST_LOG` to tune.

use std::path::PathBuf;
use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;

use horde_core::commands::PlayerCommand;
use horde_core::config::GameConfig;
use horde_core::constants::TICK_RATE;
use horde_core::enums::{AgentState, WeaponKind};
use horde_core::state::GameStateSnapshot;
use horde_sim::SimulationEngine;

const DEFAULT_TICKS: u64 = 30 * 60 * 20;
const WEAPON_DAMAGE: u32 = 40;
const WEAPON_RANGE: f64 = 60.0;

struct Options {
    config: Option<PathBuf>,
    seed: Option<u64>,
    ticks: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }
    let options = match parse_options(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {message}");
            print_usage();
            process::exit(1);
        }
    };

    let mut config = match &options.config {
        Some(path) => match GameConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        },
        None => GameConfig::default(),
    };
    if let Some(seed) = options.seed {
        config.seed = seed;
    }

    info!(seed = config.seed, ticks = options.ticks, "starting session");
    let summary = run(config, options.ticks);
    println!("{summary}");
}

fn print_usage() {
    eprintln!(
        "horde-run: headless horde survival session\n\
         \n\
           --config <path>  JSON game config (default: built-in)\n\
           --seed <N>       Override the config seed\n\
           --ticks <N>      Maximum ticks to run (default: {DEFAULT_TICKS})\n"
    );
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        config: None,
        seed: None,
        ticks: DEFAULT_TICKS,
    };
    let mut i = 0;
    while i < args.len() {
        let value = args
            .get(i + 1)
            .ok_or_else(|| format!("{} needs a value", args[i]))?;
        match args[i].as_str() {
            "--config" => options.config = Some(PathBuf::from(value)),
            "--seed" => {
                options.seed = Some(value.parse().map_err(|_| format!("bad seed: {value}"))?);
            }
            "--ticks" => {
                options.ticks = value.parse().map_err(|_| format!("bad tick count: {value}"))?;
            }
            other => return Err(format!("unknown option: {other}")),
        }
        i += 2;
    }
    Ok(options)
}

/// Run until the session ends or the tick budget is spent. Returns the
/// summary line.
fn run(config: GameConfig, max_ticks: u64) -> serde_json::Value {
    let mut engine = SimulationEngine::new(config);
    engine.queue_command(PlayerCommand::StartGame);

    let mut snap = GameStateSnapshot::default();
    for n in 0..max_ticks {
        snap = engine.tick();
        print_events(&snap);
        if snap.phase.is_terminal() {
            break;
        }
        if n % u64::from(TICK_RATE) == 0 {
            if let Some(command) = shoot_nearest(&snap) {
                engine.queue_command(command);
            }
        }
    }

    serde_json::json!({
        "type": "Summary",
        "phase": snap.phase,
        "tick": snap.time.tick,
        "wave": snap.wave.wave_number,
        "total_score": snap.score.total_score,
        "agents_killed": snap.score.agents_killed,
        "protagonist_health": snap.protagonist.map(|p| p.health),
    })
}

fn print_events(snap: &GameStateSnapshot) {
    for event in &snap.events {
        if let Ok(line) = serde_json::to_string(event) {
            println!("{line}");
        }
    }
    for event in &snap.combat_events {
        if let Ok(line) = serde_json::to_string(event) {
            println!("{line}");
        }
    }
}

fn shoot_nearest(snap: &GameStateSnapshot) -> Option<PlayerCommand> {
    let protagonist = snap.protagonist.as_ref().filter(|p| !p.dead)?;
    snap.agents
        .iter()
        .filter(|a| a.state != AgentState::Dead)
        .map(|a| (a.agent_id, protagonist.position.range_to(&a.position)))
        .filter(|(_, distance)| *distance <= WEAPON_RANGE)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(agent_id, _)| PlayerCommand::Shoot {
            agent_id,
            weapon: WeaponKind::AssaultRifle,
            base_damage: WEAPON_DAMAGE,
            range: WEAPON_RANGE,
        })
}
