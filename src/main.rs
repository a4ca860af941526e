//! go5: a minimax Go agent for small boards.
//!
//! ## Usage
//!
//! - `go5` - Show a self-play demo
//! - `go5 genmove` - Read `input.txt`, write the chosen move to `output.txt`
//! - `go5 selfplay` - Let the agent play both sides

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{LevelFilter, Log, Metadata, Record, info};

use go5::agent::{Agent, AgentConfig};
use go5::board::{GameState, Move};
use go5::constants::{DEFAULT_BOARD_SIZE, DEFAULT_DEPTH, MAX_DEPTH};
use go5::evaluator::EvaluatorKind;
use go5::protocol;

/// go5: alpha-beta Go agent for small boards
#[derive(Parser)]
#[command(name = "go5")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a position from the exchange file and write the chosen move
    Genmove {
        #[arg(long, default_value = "input.txt")]
        input: PathBuf,
        #[arg(long, default_value = "output.txt")]
        output: PathBuf,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Let the agent play both colors, printing every position
    Selfplay {
        /// Stop after this many moves if the game has not ended
        #[arg(long, default_value_t = 40)]
        max_moves: usize,
        #[command(flatten)]
        engine: EngineArgs,
    },
}

#[derive(Args)]
struct EngineArgs {
    /// Board size
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,
    /// Search depth in plies
    #[arg(long, default_value_t = DEFAULT_DEPTH,
          value_parser = clap::value_parser!(u8).range(1..=MAX_DEPTH as i64))]
    depth: u8,
    /// Position evaluator
    #[arg(long, value_enum, default_value_t = EvaluatorArg::Liberty)]
    evaluator: EvaluatorArg,
    /// Seed for choosing among equally good moves
    #[arg(long)]
    seed: Option<u64>,
    /// Always search, even on the first two plies
    #[arg(long)]
    no_opening: bool,
}

impl Default for EngineArgs {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            depth: DEFAULT_DEPTH,
            evaluator: EvaluatorArg::Liberty,
            seed: None,
            no_opening: false,
        }
    }
}

impl EngineArgs {
    fn config(&self) -> AgentConfig {
        AgentConfig {
            depth: self.depth,
            opening_override: !self.no_opening,
            evaluator: self.evaluator.into(),
            seed: self.seed,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum EvaluatorArg {
    /// Stones and group liberties
    Liberty,
    /// Liberties plus territory influence
    Influence,
}

impl From<EvaluatorArg> for EvaluatorKind {
    fn from(arg: EvaluatorArg) -> Self {
        match arg {
            EvaluatorArg::Liberty => EvaluatorKind::Liberty,
            EvaluatorArg::Influence => EvaluatorKind::Influence,
        }
    }
}

/// Writes log records to stderr.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Genmove {
            input,
            output,
            engine,
        }) => run_genmove(&input, &output, &engine),
        Some(Commands::Selfplay { max_moves, engine }) => run_selfplay(max_moves, &engine),
        None => run_selfplay(40, &EngineArgs::default()),
    }
}

fn run_genmove(input: &Path, output: &Path, engine: &EngineArgs) -> Result<()> {
    let state = protocol::read_input(input, engine.size)
        .with_context(|| format!("failed to read position from {}", input.display()))?;

    let mut agent = Agent::from_config(&engine.config());
    let mv = agent.decide(&state);
    info!("{} plays {mv}", state.to_move);

    protocol::write_output(output, mv)
        .with_context(|| format!("failed to write move to {}", output.display()))?;
    Ok(())
}

fn run_selfplay(max_moves: usize, engine: &EngineArgs) -> Result<()> {
    anyhow::ensure!(engine.size > 0, "board size must be positive");
    println!(
        "go5 self-play: {0}x{0} board, depth {1}\n",
        engine.size, engine.depth
    );

    let mut agent = Agent::from_config(&engine.config());
    let mut state = GameState::new(engine.size);
    let mut passes = 0;

    for turn in 1..=max_moves {
        let color = state.to_move;
        let mv = agent.decide(&state);
        state = state
            .play(mv)
            .with_context(|| format!("agent chose an illegal move {mv} for {color}"))?;

        println!("=== Turn {turn} | {color} plays {mv} ===");
        println!("{}", state.board);

        if mv == Move::Pass {
            passes += 1;
            if passes >= 2 {
                println!("Both sides passed.");
                return Ok(());
            }
        } else {
            passes = 0;
        }
    }
    println!("Stopped after {max_moves} moves.");
    Ok(())
}
