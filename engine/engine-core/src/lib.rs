//! Core traits and types shared by the game and search crates
//!
//! This crate provides the narrow interface the search engine consumes:
//! - `GameState`: legal actions, terminal test, in-place moves, turn tracking
//! - `Player`: the two sides of an alternating-turn game
//! - `Outcome`: win or draw at the end of a game

pub mod typed;

// Re-export main types for convenience
pub use typed::{GameState, Outcome, Player};
