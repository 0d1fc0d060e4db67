//! Typed game state interface consumed by the search engine
//!
//! The search never inspects boards directly. Everything it needs from a game
//! goes through [`GameState`]: the legal actions, the terminal test, in-place
//! move application and who moved last. Duplication is `Clone`.

use std::fmt;

/// One of the two players in an alternating-turn game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// Moves first
    Red,
    Yellow,
}

impl Player {
    /// The other player.
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Player::Red => Player::Yellow,
            Player::Yellow => Player::Red,
        }
    }

    /// Display name of the player.
    pub fn name(self) -> &'static str {
        match self {
            Player::Red => "Red",
            Player::Yellow => "Yellow",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The player completed a winning line with the last move.
    Win(Player),
    /// No legal moves remain and nobody connected.
    Draw,
}

impl Outcome {
    /// The winning player, if the game was not drawn.
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(player),
            Outcome::Draw => None,
        }
    }
}

/// Game state as seen by the search.
///
/// Implementations must keep `legal_actions` non-empty for every non-terminal
/// state, and must alternate `to_move` after each applied action.
///
/// # Example
///
/// ```rust
/// use engine_core::{GameState, Player};
///
/// /// Players alternately take 1 or 2 stones; taking the last stone wins.
/// #[derive(Debug, Clone)]
/// struct Nim {
///     stones: u8,
///     to_move: Player,
///     last_mover: Option<Player>,
/// }
///
/// impl GameState for Nim {
///     type Action = u8;
///
///     fn legal_actions(&self) -> Vec<u8> {
///         (1..=self.stones.min(2)).collect()
///     }
///     fn is_terminal(&self) -> bool {
///         self.stones == 0
///     }
///     fn apply_action(&mut self, take: u8) {
///         self.stones -= take.min(self.stones);
///         self.last_mover = Some(self.to_move);
///         self.to_move = self.to_move.opponent();
///     }
///     fn to_move(&self) -> Player {
///         self.to_move
///     }
///     fn last_mover(&self) -> Option<Player> {
///         self.last_mover
///     }
///     fn winner(&self) -> Option<Player> {
///         if self.stones == 0 { self.last_mover } else { None }
///     }
/// }
///
/// let mut nim = Nim { stones: 3, to_move: Player::Red, last_mover: None };
/// nim.apply_action(2);
/// assert_eq!(nim.legal_actions(), vec![1]);
/// nim.apply_action(1);
/// assert!(nim.is_terminal());
/// assert_eq!(nim.winner(), Some(Player::Yellow));
/// ```
pub trait GameState: Clone + fmt::Debug {
    /// Move identifier, small and cheap to copy
    type Action: Copy + Eq + fmt::Debug;

    /// Actions playable from this state, in a stable order.
    fn legal_actions(&self) -> Vec<Self::Action>;

    /// Whether the game is over (win or draw).
    fn is_terminal(&self) -> bool;

    /// Apply `action` in place and pass the turn.
    ///
    /// Callers only pass actions taken from [`GameState::legal_actions`].
    fn apply_action(&mut self, action: Self::Action);

    /// Player whose turn it is.
    fn to_move(&self) -> Player;

    /// Player who made the most recent move, `None` before the first move.
    fn last_mover(&self) -> Option<Player>;

    /// Player who has completed a winning line, if any.
    fn winner(&self) -> Option<Player>;

    /// Outcome of a terminal state, `None` while the game is in progress.
    fn outcome(&self) -> Option<Outcome> {
        if !self.is_terminal() {
            return None;
        }
        Some(self.winner().map_or(Outcome::Draw, Outcome::Win))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts up by 1 or 2; reaching exactly 4 wins, overshooting is a draw.
    #[derive(Debug, Clone, PartialEq)]
    struct CountTo4 {
        total: u8,
        to_move: Player,
        last_mover: Option<Player>,
    }

    impl CountTo4 {
        fn new() -> Self {
            Self {
                total: 0,
                to_move: Player::Red,
                last_mover: None,
            }
        }
    }

    impl GameState for CountTo4 {
        type Action = u8;

        fn legal_actions(&self) -> Vec<u8> {
            if self.is_terminal() {
                Vec::new()
            } else {
                vec![1, 2]
            }
        }

        fn is_terminal(&self) -> bool {
            self.total >= 4
        }

        fn apply_action(&mut self, action: u8) {
            self.total += action;
            self.last_mover = Some(self.to_move);
            self.to_move = self.to_move.opponent();
        }

        fn to_move(&self) -> Player {
            self.to_move
        }

        fn last_mover(&self) -> Option<Player> {
            self.last_mover
        }

        fn winner(&self) -> Option<Player> {
            if self.total == 4 {
                self.last_mover
            } else {
                None
            }
        }
    }

    #[test]
    fn test_opponent_alternates() {
        assert_eq!(Player::Red.opponent(), Player::Yellow);
        assert_eq!(Player::Yellow.opponent(), Player::Red);
        assert_eq!(Player::Red.opponent().opponent(), Player::Red);
    }

    #[test]
    fn test_player_names() {
        assert_eq!(Player::Red.to_string(), "Red");
        assert_eq!(Player::Yellow.to_string(), "Yellow");
    }

    #[test]
    fn test_outcome_in_progress() {
        let state = CountTo4::new();
        assert_eq!(state.outcome(), None);
    }

    #[test]
    fn test_outcome_win() {
        let mut state = CountTo4::new();
        state.apply_action(2); // Red
        state.apply_action(2); // Yellow reaches 4
        assert_eq!(state.outcome(), Some(Outcome::Win(Player::Yellow)));
        assert_eq!(Outcome::Win(Player::Yellow).winner(), Some(Player::Yellow));
    }

    #[test]
    fn test_outcome_draw() {
        let mut state = CountTo4::new();
        state.apply_action(2);
        state.apply_action(1);
        state.apply_action(2); // overshoots to 5
        assert_eq!(state.outcome(), Some(Outcome::Draw));
        assert_eq!(Outcome::Draw.winner(), None);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = CountTo4::new();
        let mut copy = original.clone();
        copy.apply_action(1);
        assert_eq!(original.total, 0);
        assert_eq!(copy.total, 1);
    }
}
