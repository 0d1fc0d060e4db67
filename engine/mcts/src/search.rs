//! MCTS search implementation.
//!
//! Implements the core MCTS algorithm:
//! 1. Selection: Descend fully expanded nodes by UCB1 until a node with an
//!    untried action (or a terminal position) is reached
//! 2. Expansion: Add one child for a random untried action
//! 3. Simulation: Random playout from the new child to the end of the game
//! 4. Backpropagation: Update visits and owner-relative rewards up to the root

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use engine_core::GameState;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::{MctsConfig, SearchLimit};
use crate::node::NodeId;
use crate::rollout::{apply_checked, random_playout};
use crate::tree::MctsTree;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult<A> {
    /// Best action to take (most visited root child)
    pub action: A,

    /// Mean reward of the chosen child, from the mover's point of view
    pub value: f64,

    /// Number of iterations performed
    pub iterations: u32,

    /// Wall-clock time spent searching
    pub elapsed: Duration,

    /// (action, visits, reward) of every root child in insertion order
    pub children: Vec<(A, u32, f64)>,
}

/// MCTS search state.
pub struct MctsSearch<'a, S: GameState> {
    tree: MctsTree<S::Action>,
    root_state: &'a S,
    limit: SearchLimit,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a, S: GameState> MctsSearch<'a, S> {
    /// Create a new MCTS search from the given game state.
    ///
    /// Fails before any tree work if the configuration is invalid or the
    /// state is already terminal.
    pub fn new(root_state: &'a S, config: &MctsConfig) -> Result<Self, SearchError> {
        let limit = config.limit()?;

        if root_state.is_terminal() {
            return Err(SearchError::InvalidState(
                "cannot search from a terminal position".to_string(),
            ));
        }

        let root_owner = root_state
            .last_mover()
            .unwrap_or_else(|| root_state.to_move().opponent());

        Ok(Self {
            tree: MctsTree::new(root_owner),
            root_state,
            limit,
            cancel: None,
        })
    }

    /// Stop early once `flag` is set. Checked between iterations only.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Run the search until the configured limit and pick the most visited move.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult<S::Action>, SearchError> {
        let start = Instant::now();
        let mut iterations = 0u32;

        match self.limit {
            SearchLimit::Iterations(n) => {
                while iterations < n && !self.is_cancelled() {
                    self.iterate(rng);
                    iterations += 1;
                }
            }
            SearchLimit::Time(budget) => {
                // Always complete one iteration so a positive budget yields a move
                loop {
                    if self.is_cancelled() {
                        break;
                    }
                    self.iterate(rng);
                    iterations += 1;
                    if start.elapsed() >= budget {
                        break;
                    }
                }
            }
        }

        let elapsed = start.elapsed();
        let (action, visits) = self.tree.best_action().ok_or_else(|| {
            SearchError::InvalidState("search finished without expanding the root".to_string())
        })?;

        let children = self.tree.root_children();
        let value = children
            .iter()
            .find(|(a, _, _)| *a == action)
            .map(|&(_, n, reward)| if n == 0 { 0.0 } else { reward / n as f64 })
            .unwrap_or(0.0);

        let stats = self.tree.stats();
        debug!(
            iterations,
            elapsed_ms = elapsed.as_millis() as u64,
            action = ?action,
            visits,
            value,
            total_nodes = stats.total_nodes,
            max_depth = stats.max_depth,
            "MCTS search complete"
        );

        Ok(SearchResult {
            action,
            value,
            iterations,
            elapsed,
            children,
        })
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Run a single iteration (select -> expand -> simulate -> backpropagate).
    fn iterate(&mut self, rng: &mut ChaCha20Rng) {
        let mut state = self.root_state.clone();

        let (node_id, depth) = self.select(&mut state);
        let leaf_id = self.expand(node_id, &mut state, rng);
        let outcome = random_playout(&state, rng);
        self.tree.backpropagate(leaf_id, outcome);

        trace!(
            leaf = leaf_id.0,
            depth,
            outcome = ?outcome,
            "MCTS iteration complete"
        );
    }

    /// Descend from the root, applying each chosen action to `state`.
    ///
    /// Stops at a terminal position or at the first node that still has
    /// untried actions. Returns the node and its depth.
    fn select(&self, state: &mut S) -> (NodeId, u32) {
        let mut current = self.tree.root();
        let mut depth = 0;

        loop {
            if state.is_terminal() {
                break;
            }

            let node = self.tree.get(current);
            if node.children.len() < state.legal_actions().len() {
                break;
            }

            let Some(child_id) = self.tree.select_child(current) else {
                break;
            };
            if let Some(action) = self.tree.get(child_id).action {
                apply_checked(state, action);
            }
            current = child_id;
            depth += 1;
        }

        (current, depth)
    }

    /// Add one child for a random untried action and advance `state` into it.
    ///
    /// Terminal nodes are returned unchanged.
    fn expand(&mut self, node_id: NodeId, state: &mut S, rng: &mut ChaCha20Rng) -> NodeId {
        if state.is_terminal() {
            return node_id;
        }

        let untried: Vec<S::Action> = state
            .legal_actions()
            .into_iter()
            .filter(|&action| !self.tree.has_child(node_id, action))
            .collect();

        let Some(&action) = untried.choose(rng) else {
            return node_id;
        };

        apply_checked(state, action);
        self.tree.add_child(node_id, action)
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree<S::Action> {
        &self.tree
    }
}

/// Run a single MCTS search and return the full result.
pub fn run_mcts<S: GameState>(
    state: &S,
    config: &MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult<S::Action>, SearchError> {
    let mut search = MctsSearch::new(state, config)?;
    search.run(rng)
}

/// Pick the next move for the player to move in `state`.
pub fn search<S: GameState>(
    state: &S,
    config: &MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<S::Action, SearchError> {
    run_mcts(state, config, rng).map(|result| result.action)
}
