//! Robot Arena - Entry Point
//!
//! Interactive console game: build a party of player robots, then fight the
//! boss turn by turn. The roster is cleared after every battle.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use robot_arena::battle::BattleEngine;
use robot_arena::core::config::{config, set_config, ArenaConfig};
use robot_arena::core::error::{ArenaError, Result};
use robot_arena::ui::{Console, MainMenuChoice};

#[derive(Parser, Debug)]
#[command(name = "robot-arena")]
#[command(about = "Lead a party of robots against a boss robot")]
struct Args {
    /// Seed for boss targeting (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Display name of the boss
    #[arg(long, default_value = "Mega Boss")]
    boss_name: String,

    /// Do not wait for ENTER between turns
    #[arg(long)]
    no_pause: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut arena_config = ArenaConfig::new();
    arena_config.boss_name = args.boss_name;
    arena_config.seed = args.seed;
    arena_config.pause_between_turns = !args.no_pause;
    if let Some(filter) = args.log {
        arena_config.log_filter = filter;
    }
    arena_config.validate()?;

    init_tracing(&arena_config.log_filter);
    if set_config(arena_config).is_err() {
        tracing::warn!("arena config was already set");
    }
    let config = config();

    tracing::info!(boss = %config.boss_name, seed = ?config.seed, "Robot Arena starting...");

    let mut console = Console::stdio(config.pause_between_turns);
    let mut battles: u64 = 0;
    let mut engine = BattleEngine::with_seed(config.boss_name.clone(), battle_seed(battles));

    loop {
        let Some(choice) = console.main_menu()? else {
            break;
        };

        match choice {
            MainMenuChoice::AddRobot => {
                let Some((name, archetype)) = console.prompt_new_robot()? else {
                    break;
                };
                engine.add_robot(name.clone(), archetype)?;
                console.message(&format!("Robot {} ({}) joined the team!", name, archetype.name()))?;
                console.wait_for_enter()?;
            }
            MainMenuChoice::StartBattle => {
                match engine.start() {
                    Ok(()) => {}
                    Err(ArenaError::EmptyRoster) => {
                        console.message("You need at least one robot to start a battle!")?;
                        console.wait_for_enter()?;
                        continue;
                    }
                    Err(e) => return Err(e),
                }

                console.clear()?;
                console.message("=== THE BATTLE BEGINS! ===")?;
                console.wait_for_enter()?;

                let outcome = engine.run_with(&mut console)?;
                tracing::info!(?outcome, rounds = engine.round() - 1, "battle finished");

                battles += 1;
                engine = BattleEngine::with_seed(config.boss_name.clone(), battle_seed(battles));
            }
            MainMenuChoice::Quit => break,
        }

        if console.is_closed() {
            break;
        }
    }

    console.message("Thanks for playing!")?;
    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// A fixed `--seed` gives each battle of the session its own reproducible seed
fn battle_seed(battle: u64) -> u64 {
    match config().seed {
        Some(seed) => seed.wrapping_add(battle),
        None => rand::random(),
    }
}
