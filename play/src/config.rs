//! Command-line configuration for the `connect4` binary.
//!
//! Defaults come from config.toml (with `CONNECT4_*` environment overrides)
//! via `engine-config`. CLI arguments take highest priority.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use games_connect4::Connect4;
use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;

use crate::difficulty::Difficulty;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

fn default_difficulty() -> Difficulty {
    Difficulty::from_limits(
        CENTRAL_CONFIG.search.iterations,
        CENTRAL_CONFIG.search.time_limit_ms,
    )
}

fn default_rows() -> usize {
    CENTRAL_CONFIG.board.rows
}

fn default_cols() -> usize {
    CENTRAL_CONFIG.board.cols
}

fn default_connect_n() -> usize {
    CENTRAL_CONFIG.board.connect_n
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

#[derive(Parser, Debug, Clone)]
#[command(name = "connect4")]
#[command(about = "Play Connect 4 in the terminal against a Monte Carlo tree search engine")]
#[command(
    long_about = "You play Red and move first; the engine answers as Yellow.

Type a column number and press Enter to move, 'd' to change the engine
difficulty, 'r' to restart and 'x' to exit.

Defaults are read from config.toml with CONNECT4_<SECTION>_<KEY> environment
overrides. CLI arguments take highest priority."
)]
pub struct Config {
    /// Engine budget per move: iterations (e.g. 100) or thinking time (e.g. 250ms)
    #[arg(long, default_value_t = default_difficulty())]
    pub difficulty: Difficulty,

    /// Number of rows on the board
    #[arg(long, default_value_t = default_rows())]
    pub rows: usize,

    /// Number of columns on the board
    #[arg(long, default_value_t = default_cols())]
    pub cols: usize,

    /// Pieces in a row needed to win
    #[arg(long, default_value_t = default_connect_n())]
    pub connect_n: usize,

    /// Seed for the engine's random number generator (random if unset)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        Connect4::with_dimensions(self.rows, self.cols, self.connect_n)
            .map_err(|e| anyhow!("invalid board: {e}"))?;

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    /// Seed from the command line, falling back to `[search] seed`.
    pub fn seed(&self) -> Option<u64> {
        self.seed.or(CENTRAL_CONFIG.search.seed)
    }
}
