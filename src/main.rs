use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use greedy_snake::auto::AutoController;
use greedy_snake::config::{ConfigError, SimConfig};
use greedy_snake::game::{EndedRound, RoundOutcome, SimulationEngine, Snapshot, Step};
use greedy_snake::input::{Direction, ParseDirectionError, parse_moves};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum Mode {
    /// Greedy autopilot steers every tick.
    Auto,
    /// Directions come from `--moves`.
    Scripted,
}

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Who steers the snake.
    #[arg(long, value_enum, default_value_t = Mode::Auto)]
    mode: Mode,

    /// Scripted input, one character per tick: U, D, L, R, or `.` to hold course.
    #[arg(long, default_value = "")]
    moves: String,

    /// Number of rounds to play back to back.
    #[arg(long, default_value_t = 1)]
    rounds: u32,

    /// Fruit RNG seed; overrides the config file.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON config file with playfield size and victory score.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop a round that has not ended after this many ticks.
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,

    /// Print each round's final snapshot as JSON on stdout.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Error)]
enum HostError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid --moves: {0}")]
    Moves(#[from] ParseDirectionError),
    #[error("failed to encode snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// How a round left the host loop.
enum RoundReport {
    Ended(EndedRound),
    /// Tick limit hit or script exhausted while still running.
    Stopped(Snapshot),
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, "host shell failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: &Cli) -> Result<(), HostError> {
    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let script = parse_moves(&cli.moves)?;
    if cli.mode == Mode::Scripted && script.is_empty() {
        warn!("scripted mode with no moves; every round stops immediately");
    }

    let mut wins = 0_u32;
    let mut best_score = 0_u32;

    for round in 0..cli.rounds {
        let round_config = SimConfig {
            seed: config.seed.map(|seed| seed.wrapping_add(u64::from(round))),
            ..config
        };
        let engine = SimulationEngine::new_round(&round_config)?;
        debug!(
            round = round + 1,
            seed = ?round_config.seed,
            victory_score = engine.victory_score(),
            "round started"
        );

        let snapshot = match play_round(engine, cli.mode, &script, cli.max_ticks) {
            RoundReport::Ended(ended) => {
                info!(
                    round = round + 1,
                    outcome = ?ended.outcome(),
                    reason = ?ended.death_reason(),
                    score = ended.score(),
                    ticks = ended.snapshot().ticks,
                    "round ended"
                );
                if ended.outcome() == RoundOutcome::Victory {
                    wins += 1;
                }
                ended.snapshot().clone()
            }
            RoundReport::Stopped(snapshot) => {
                warn!(
                    round = round + 1,
                    score = snapshot.score,
                    ticks = snapshot.ticks,
                    "round stopped before ending"
                );
                snapshot
            }
        };

        best_score = best_score.max(snapshot.score);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }

    info!(rounds = cli.rounds, wins, best_score, "session finished");
    Ok(())
}

fn play_round(
    mut engine: SimulationEngine,
    mode: Mode,
    script: &[Option<Direction>],
    max_ticks: u64,
) -> RoundReport {
    let auto = AutoController::new(engine.grid());
    let mut moves = script.iter();

    for _ in 0..max_ticks {
        let requested = match mode {
            Mode::Auto => auto.next_move_for(&engine.snapshot()),
            Mode::Scripted => match moves.next() {
                Some(Some(direction)) => *direction,
                Some(None) => engine.snake().direction(),
                None => return RoundReport::Stopped(engine.snapshot()),
            },
        };

        match engine.tick(requested) {
            Step::Running(next) => engine = next,
            Step::Ended(ended) => return RoundReport::Ended(ended),
        }
    }

    RoundReport::Stopped(engine.snapshot())
}
