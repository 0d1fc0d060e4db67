//! Engine strength as entered by the player.
//!
//! A bare positive integer is an iteration count (`100`); a positive integer
//! followed by `ms` is a thinking time in milliseconds (`250ms`).

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use mcts::MctsConfig;
use thiserror::Error;

/// Iterations used when nothing else is configured.
pub const DEFAULT_ITERATIONS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    /// Fixed number of search iterations per move
    Iterations(u32),
    /// Wall-clock thinking time per move
    ThinkTime(Duration),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid difficulty '{0}': expected a positive iteration count (e.g. 100) or milliseconds (e.g. 250ms)")]
pub struct ParseDifficultyError(String);

impl Difficulty {
    /// Build from the `[search]` config values. A time limit takes precedence
    /// over an iteration count; zero values are ignored.
    pub fn from_limits(iterations: Option<u32>, time_limit_ms: Option<u64>) -> Self {
        match (time_limit_ms.filter(|&ms| ms > 0), iterations.filter(|&n| n > 0)) {
            (Some(ms), _) => Difficulty::ThinkTime(Duration::from_millis(ms)),
            (None, Some(n)) => Difficulty::Iterations(n),
            (None, None) => Difficulty::default(),
        }
    }

    pub fn to_mcts_config(self) -> MctsConfig {
        match self {
            Difficulty::Iterations(n) => MctsConfig::with_iterations(n),
            Difficulty::ThinkTime(d) => MctsConfig::with_time_limit(d),
        }
    }

    /// Human-readable form for the status line.
    pub fn describe(&self) -> String {
        match self {
            Difficulty::Iterations(n) => format!("{n} iterations"),
            Difficulty::ThinkTime(d) => format!("{} milliseconds", d.as_millis()),
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Iterations(DEFAULT_ITERATIONS)
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ParseDifficultyError(trimmed.to_string());

        if let Some(ms) = trimmed.strip_suffix("ms") {
            return match ms.parse::<u64>() {
                Ok(ms) if ms > 0 => Ok(Difficulty::ThinkTime(Duration::from_millis(ms))),
                _ => Err(invalid()),
            };
        }

        match trimmed.parse::<u32>() {
            Ok(n) if n > 0 => Ok(Difficulty::Iterations(n)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Iterations(n) => write!(f, "{n}"),
            Difficulty::ThinkTime(d) => write!(f, "{}ms", d.as_millis()),
        }
    }
}
