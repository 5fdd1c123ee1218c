//! bulwark-headless: run a full game without a renderer.
//!
//! Usage:
//!   bulwark-headless --build basic@400,250 --build sniper@300,300
//!   bulwark-headless --config level.json --frame-ms 33 --dump-snapshot final.json

use std::path::PathBuf;
use std::process;

use bulwark_core::commands::{CommandOutcome, PlayerCommand};
use bulwark_core::enums::{GamePhase, TowerKind};
use bulwark_core::events::GameEvent;
use bulwark_core::state::GameStateSnapshot;
use bulwark_sim::{SessionConfig, SimulationEngine};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bulwark-headless")]
#[command(about = "Headless tower-defense runner")]
struct Args {
    /// JSON session config (defaults to the built-in level)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated frame length in milliseconds
    #[arg(long, default_value = "16.0")]
    frame_ms: f64,

    /// Stop after this much simulated time
    #[arg(long, default_value = "600")]
    max_seconds: u32,

    /// Write the final snapshot to this file as pretty JSON
    #[arg(long)]
    dump_snapshot: Option<PathBuf>,

    /// Tower to build as soon as it is affordable, `kind@x,y`. Repeatable;
    /// builds happen in the order given.
    #[arg(long = "build", value_parser = parse_build)]
    builds: Vec<BuildOrder>,
}

#[derive(Debug, Clone, Copy)]
struct BuildOrder {
    kind: TowerKind,
    x: f32,
    y: f32,
}

fn parse_build(raw: &str) -> Result<BuildOrder, String> {
    let (kind, coords) = raw
        .split_once('@')
        .ok_or_else(|| format!("expected kind@x,y, got {raw:?}"))?;
    let kind = TowerKind::ALL
        .into_iter()
        .find(|k| k.name().eq_ignore_ascii_case(kind))
        .ok_or_else(|| format!("unknown tower kind {kind:?}"))?;
    let (x, y) = coords
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got {coords:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y: {e}"))?;
    Ok(BuildOrder { kind, x, y })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if args.frame_ms <= 0.0 {
        eprintln!("--frame-ms must be positive");
        process::exit(2);
    }

    let config = match &args.config {
        Some(path) => match SessionConfig::from_json_file(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Failed to load config: {err}");
                process::exit(1);
            }
        },
        None => SessionConfig::default(),
    };

    let mut engine = match SimulationEngine::new(config) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("Invalid config: {err}");
            process::exit(1);
        }
    };

    if let Err(err) = engine.handle_command(PlayerCommand::StartGame) {
        eprintln!("Could not start: {err}");
        process::exit(1);
    }

    let summary = run(&mut engine, &args);
    print_summary(&engine, &summary);

    if let Some(path) = &args.dump_snapshot {
        let written = serde_json::to_string_pretty(&summary.last)
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(path, json).map_err(|e| e.to_string()));
        match written {
            Ok(()) => info!(path = %path.display(), "snapshot written"),
            Err(err) => {
                eprintln!("Failed to write snapshot: {err}");
                process::exit(1);
            }
        }
    }
}

struct RunSummary {
    last: GameStateSnapshot,
    waves_cleared: usize,
    leaks: usize,
}

fn run(engine: &mut SimulationEngine, args: &Args) -> RunSummary {
    let mut pending = args.builds.iter().copied().peekable();
    let limit_ms = f64::from(args.max_seconds) * 1000.0;
    let mut now_ms = 0.0;
    let mut summary = RunSummary {
        last: GameStateSnapshot::default(),
        waves_cleared: 0,
        leaks: 0,
    };

    while now_ms < limit_ms {
        while let Some(order) = pending.peek().copied() {
            if !affordable(engine, order.kind) {
                break;
            }
            pending.next();
            place(engine, order);
        }

        now_ms += args.frame_ms;
        let snapshot = engine.tick(now_ms, args.frame_ms);
        for event in &snapshot.events {
            match event {
                GameEvent::WaveCompleted { .. } => summary.waves_cleared += 1,
                GameEvent::EnemyLeaked { .. } => summary.leaks += 1,
                _ => {}
            }
        }
        let over = snapshot.phase != GamePhase::Playing;
        summary.last = snapshot;
        if over {
            break;
        }
    }

    if summary.last.phase == GamePhase::Playing {
        warn!(seconds = args.max_seconds, "time limit reached before the game ended");
    }
    summary
}

fn affordable(engine: &SimulationEngine, kind: TowerKind) -> bool {
    engine
        .session()
        .is_some_and(|s| s.economy().can_afford(engine.config().towers.get(kind).cost))
}

fn place(engine: &mut SimulationEngine, order: BuildOrder) {
    let placed = engine
        .handle_command(PlayerCommand::SelectTowerKind { kind: order.kind })
        .and_then(|_| engine.pointer_down(order.x, order.y));
    match placed {
        Ok(CommandOutcome::TowerPlaced { tower }) => {
            info!(tower = tower.0, kind = ?order.kind, x = order.x, y = order.y, "built");
        }
        Ok(other) => {
            warn!(?order, ?other, "build skipped");
            let _ = engine.handle_command(PlayerCommand::DeselectTower);
        }
        Err(err) => warn!(?order, %err, "build rejected"),
    }
    // Selecting the same kind again toggles it off.
    if engine.session().and_then(|s| s.selected_kind()) == Some(order.kind) {
        let _ = engine.handle_command(PlayerCommand::SelectTowerKind { kind: order.kind });
    }
}

fn print_summary(engine: &SimulationEngine, summary: &RunSummary) {
    let last = &summary.last;
    let outcome = match last.phase {
        GamePhase::Victory => "VICTORY",
        GamePhase::Defeat => "DEFEAT",
        _ => "UNFINISHED",
    };
    println!("Outcome:       {outcome}");
    println!("Time:          {:.1}s", last.time.now_ms / 1000.0);
    println!("Score:         {}", last.score);
    println!("Lives:         {}", last.lives);
    println!("Currency:      {}", last.currency);
    println!("Waves cleared: {}/{}", summary.waves_cleared, last.wave.total_waves);
    println!("Leaks:         {}", summary.leaks);

    let session = engine.finished_session().or_else(|| engine.session());
    let Some(session) = session else {
        return;
    };
    for view in &last.towers {
        if let Some(details) = session.tower_details(view.id) {
            println!(
                "  Tower {:>2} {:<7} ({:>5.0},{:>5.0})  kills {:>3}  damage {:>4}",
                details.id.0,
                details.name,
                details.position.x,
                details.position.y,
                details.kills,
                details.damage_dealt
            );
        }
    }
}
