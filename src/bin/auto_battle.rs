//! Headless Battle Runner
//!
//! Plays a full battle with scripted player robots and prints the result.

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use robot_arena::battle::{
    BattleEngine, BattleEvent, BattleOutcome, NullObserver, ScriptedController,
};
use robot_arena::combat::{Archetype, Robot, RobotRole};
use robot_arena::core::error::Result;

/// Headless Battle Runner - scripted party vs boss
#[derive(Parser, Debug)]
#[command(name = "auto_battle")]
#[command(about = "Run a scripted robot party against the boss and report the result")]
struct Args {
    /// Player robot as NAME:ARCHETYPE (repeatable, e.g. --robot Volt:attacker)
    #[arg(long = "robot", value_parser = parse_robot)]
    robots: Vec<(String, Archetype)>,

    /// Display name of the boss
    #[arg(long, default_value = "Mega Boss")]
    boss_name: String,

    /// Maximum rounds before giving up (undecided)
    #[arg(long, default_value_t = 500)]
    max_rounds: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Include the full battle log in the output
    #[arg(long)]
    events: bool,

    /// Log every turn to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct BattleResult {
    outcome: String,
    rounds: u32,
    boss_energy: i32,
    robots: Vec<RobotResult>,
    log_entries: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    log: Vec<BattleEvent>,
    seed: u64,
}

#[derive(Serialize)]
struct RobotResult {
    name: String,
    archetype: String,
    energy: i32,
    defeated: bool,
}

impl From<&Robot> for RobotResult {
    fn from(robot: &Robot) -> Self {
        let archetype = match robot.role() {
            RobotRole::Player(archetype) => archetype.name(),
            RobotRole::Boss => "Boss",
        };
        Self {
            name: robot.name().to_string(),
            archetype: archetype.to_string(),
            energy: robot.energy(),
            defeated: robot.is_defeated(),
        }
    }
}

fn parse_robot(value: &str) -> std::result::Result<(String, Archetype), String> {
    let (name, archetype) = value
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:ARCHETYPE, got '{}'", value))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("robot name cannot be empty".to_string());
    }
    let archetype = archetype.parse::<Archetype>().map_err(|e| e.to_string())?;
    Ok((name.to_string(), archetype))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "robot_arena=debug"
    } else {
        "robot_arena=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut engine = BattleEngine::with_seed(args.boss_name.clone(), seed);

    let roster = if args.robots.is_empty() {
        Archetype::ALL
            .iter()
            .map(|a| (a.name().to_string(), *a))
            .collect()
    } else {
        args.robots
    };
    for (name, archetype) in roster {
        engine.add_robot(name, archetype)?;
    }
    engine.start()?;

    let mut controller = ScriptedController;
    let mut observer = NullObserver;
    let mut outcome = None;
    while outcome.is_none() && engine.round() <= args.max_rounds {
        outcome = engine.run_round(&mut controller, &mut observer)?;
    }

    if outcome.is_none() {
        tracing::warn!(max_rounds = args.max_rounds, "no winner before the round limit");
    }

    let result = BattleResult {
        outcome: match outcome {
            Some(BattleOutcome::PlayerVictory) => "player_victory",
            Some(BattleOutcome::BossVictory) => "boss_victory",
            None => "undecided",
        }
        .to_string(),
        rounds: engine.round() - 1,
        boss_energy: engine.boss().energy(),
        robots: engine.players().iter().map(RobotResult::from).collect(),
        log_entries: engine.log().len(),
        log: if args.events {
            engine.log().events().to_vec()
        } else {
            Vec::new()
        },
        seed,
    };

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        "text" => {
            println!("=== Battle Result ===");
            println!("Outcome: {}", result.outcome);
            println!("Rounds: {}", result.rounds);
            println!("{}: {} energy", args.boss_name, result.boss_energy);
            for robot in &result.robots {
                let status = if robot.defeated { " (defeated)" } else { "" };
                println!(
                    "{} [{}]: {} energy{}",
                    robot.name, robot.archetype, robot.energy, status
                );
            }
            println!("Log entries: {}", result.log_entries);
            for event in &result.log {
                println!("  [R{}] {}", event.round, event.description);
            }
            println!("Seed: {}", result.seed);
        }
        other => eprintln!("Unknown format '{}', use json or text", other),
    }

    Ok(())
}
