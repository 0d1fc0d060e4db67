//! Centralized configuration loading from config.toml.
//!
//! Shared by the `connect4` binary and anything else that needs the board
//! geometry or the default engine budget.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`CONNECT4_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! Command-line flags in the binary sit above all of these.
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! CONNECT4_<SECTION>_<KEY>=value
//!
//! Examples:
//!     CONNECT4_COMMON_LOG_LEVEL=debug
//!     CONNECT4_BOARD_COLS=9
//!     CONNECT4_SEARCH_TIME_LIMIT_MS=500
//!     CONNECT4_SEARCH_SEED=7
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, CONFIG_PATH_VAR, CONFIG_SEARCH_PATHS,
};
pub use structs::*;
