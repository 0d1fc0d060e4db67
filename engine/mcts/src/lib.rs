//! Monte Carlo Tree Search (MCTS) with UCB1 selection and random playouts.
//!
//! This crate provides a game-agnostic UCT search that works with any game
//! implementing the `engine-core` [`GameState`](engine_core::GameState) trait.
//!
//! # Overview
//!
//! MCTS is a search algorithm that builds a search tree by running iterations.
//! Each iteration consists of four phases:
//!
//! 1. **Selection**: Traverse fully expanded nodes using UCB1 to
//!    balance exploration and exploitation
//! 2. **Expansion**: At the first node with untried actions, add one child
//!    for a random untried action
//! 3. **Simulation**: Play random moves from the new child to the end of the game
//! 4. **Backpropagation**: Update visit counts and owner-relative rewards along
//!    the path from leaf to root
//!
//! After the budget is spent, the most visited child of the root is returned.
//!
//! # Usage
//!
//! ```rust
//! use mcts::{search, MctsConfig};
//! use games_connect4::{Action, Connect4};
//! use rand_chacha::ChaCha20Rng;
//! use rand::SeedableRng;
//!
//! // Red has three in column 0 and is to move
//! let state = Connect4::from_moves(&[0, 1, 0, 1, 0, 1]).unwrap();
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let action = search(&state, &MctsConfig::with_iterations(500), &mut rng).unwrap();
//!
//! assert_eq!(action, Action::Drop(0));
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct sets the stopping condition. Exactly one of:
//!
//! - `iteration_limit`: run a fixed number of iterations
//! - `time_limit`: iterate until the wall-clock budget is spent
//!
//! The exploration constant is fixed at `sqrt(2)` ([`node::EXPLORATION`]).
//!
//! # Architecture
//!
//! ```text
//! +-------------------------------------------------------------+
//! |                         MctsSearch                          |
//! +-------------------------------------------------------------+
//! |  +-------------+  +-------------+  +---------------------+  |
//! |  |  MctsTree   |  |  GameState  |  |   random_playout    |  |
//! |  |  (arena)    |  | (root copy) |  |  (ChaCha20Rng)      |  |
//! |  +------+------+  +------+------+  +----------+----------+  |
//! |         |                |                    |             |
//! |         v                v                    v             |
//! |  +-------------------------------------------------------+  |
//! |  |        select -> expand -> simulate ->                |  |
//! |  |                   backpropagate                       |  |
//! |  +-------------------------------------------------------+  |
//! +-------------------------------------------------------------+
//! ```
//!
//! # Concurrency
//!
//! The search is single-threaded. A cancel flag
//! ([`MctsSearch::with_cancel_flag`]) is only checked between iterations,
//! since the tree is mid-update inside one.

pub mod config;
pub mod node;
pub mod rollout;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::{MctsConfig, SearchLimit};
pub use node::{MctsNode, NodeId};
pub use rollout::random_playout;
pub use search::{run_mcts, search, MctsSearch, SearchError, SearchResult};
pub use tree::{MctsTree, TreeStats};
