//! Random playouts used to estimate leaf positions.

use engine_core::{GameState, Outcome};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

/// Apply `action` and check that it passed the turn.
///
/// A game that ignores an action would leave the tree's owner alternation
/// out of step with the real position.
pub(crate) fn apply_checked<S: GameState>(state: &mut S, action: S::Action) {
    let mover = state.to_move();
    state.apply_action(action);
    debug_assert_eq!(
        state.last_mover(),
        Some(mover),
        "action {action:?} was not applied"
    );
}

/// Play uniformly random legal moves from `state` until the game ends.
///
/// Works on a private copy; `state` itself is left untouched. Returns the
/// winner, or [`Outcome::Draw`] if the board fills without a line.
pub fn random_playout<S: GameState>(state: &S, rng: &mut ChaCha20Rng) -> Outcome {
    let mut state = state.clone();

    while !state.is_terminal() {
        let actions = state.legal_actions();
        let Some(&action) = actions.choose(rng) else {
            break;
        };
        apply_checked(&mut state, action);
    }

    state.winner().map_or(Outcome::Draw, Outcome::Win)
}
