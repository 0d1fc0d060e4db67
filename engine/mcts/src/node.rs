//! MCTS tree node representation.
//!
//! Each node represents the position reached by taking `action` from the
//! parent. Statistics are kept from the point of view of the node's `owner`,
//! the player who made that move.

use engine_core::{Outcome, Player};

/// UCB1 exploration constant, `C = sqrt(2)`.
pub const EXPLORATION: f64 = std::f64::consts::SQRT_2;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode<A> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Action that led to this node from parent (None for root)
    pub action: Option<A>,

    /// Player whose move produced this node
    pub owner: Player,

    /// Children in insertion order. Grows by one per expansion.
    pub children: Vec<NodeId>,

    /// Number of iterations that passed through this node
    pub visits: u32,

    /// Owner-relative score: +1 per win, -1 per loss, 0 per draw
    pub reward: f64,
}

impl<A> MctsNode<A> {
    /// Create a new root node.
    ///
    /// `owner` is the player who made the last move in the root position.
    pub fn new_root(owner: Player) -> Self {
        Self {
            parent: NodeId::NONE,
            action: None,
            owner,
            children: Vec::new(),
            visits: 0,
            reward: 0.0,
        }
    }

    /// Create a new child node owned by the opponent of `parent_owner`.
    pub fn new_child(parent: NodeId, action: A, parent_owner: Player) -> Self {
        Self {
            parent,
            action: Some(action),
            owner: parent_owner.opponent(),
            children: Vec::new(),
            visits: 0,
            reward: 0.0,
        }
    }

    /// Mean reward U/N. Returns 0.0 if never visited.
    #[inline]
    pub fn mean_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.reward / self.visits as f64
        }
    }

    /// UCB1 score for child selection.
    /// UCB1 = U/N + C * sqrt(ln(N_parent) / N)
    ///
    /// Unvisited nodes score +infinity so every child is tried once before
    /// any is revisited.
    #[inline]
    pub fn ucb1(&self, parent_visits: u32) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let n = self.visits as f64;
        self.mean_reward() + EXPLORATION * ((parent_visits as f64).ln() / n).sqrt()
    }

    /// Record one finished playout through this node.
    #[inline]
    pub fn record(&mut self, outcome: Outcome) {
        self.visits += 1;
        match outcome {
            Outcome::Win(winner) if winner == self.owner => self.reward += 1.0,
            Outcome::Win(_) => self.reward -= 1.0,
            Outcome::Draw => {}
        }
    }
}
