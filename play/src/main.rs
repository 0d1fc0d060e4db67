//! connect4 - play Connect 4 in the terminal against an MCTS engine
//!
//! The human plays Red and moves first. Each engine reply is a fresh UCT
//! search from the current position with the configured budget.

use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::info;

mod config;
mod difficulty;
mod game;

use crate::config::Config;
use crate::game::{BoardSize, Session};

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so they never interleave with the board on stdout
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(
        rows = config.rows,
        cols = config.cols,
        connect_n = config.connect_n,
        difficulty = %config.difficulty,
        "Starting connect4"
    );

    let rng = match config.seed() {
        Some(seed) => {
            info!(seed, "Using fixed engine seed");
            ChaCha20Rng::seed_from_u64(seed)
        }
        None => ChaCha20Rng::from_entropy(),
    };

    let board = BoardSize {
        rows: config.rows,
        cols: config.cols,
        connect_n: config.connect_n,
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), board, config.difficulty, rng);
    session.run()?;

    info!(difficulty = %session.difficulty(), "Session finished");
    Ok(())
}
