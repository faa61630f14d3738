//! Automated move selection and self-play
//!
//! Move choice is a trait so demos and tests can drive a game without an
//! input collaborator.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::board::BoardGraph;
use crate::error::Result;
use crate::game::GameController;
use crate::rules::{GameState, MoveOutcome};

/// Trait for choosing a move in a position
///
/// Returning `None` means the selector has nothing to play.
pub trait MoveSelector {
    /// Choose a slot for the player to move
    fn select_move(&mut self, board: &BoardGraph, state: &GameState) -> Option<usize>;
}

/// Picks uniformly among the valid moves
///
/// Deterministic for a given seed.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: ChaCha8Rng,
}

impl RandomSelector {
    /// Create a selector with a fixed seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl MoveSelector for RandomSelector {
    fn select_move(&mut self, _board: &BoardGraph, state: &GameState) -> Option<usize> {
        state.valid_moves().choose(&mut self.rng).copied()
    }
}

/// Play moves chosen by `selector` until it has none or `max_moves` is hit
///
/// # Arguments
///
/// * `game` - Controller to play on, from its current position
/// * `selector` - Chooses each move
/// * `max_moves` - Upper bound on moves played
///
/// # Returns
///
/// The outcome of every move played, in order
///
/// # Errors
///
/// Propagates `InvalidMove` if the selector picks a slot that is not valid.
pub fn random_playout<S: MoveSelector>(
    game: &mut GameController,
    selector: &mut S,
    max_moves: usize,
) -> Result<Vec<MoveOutcome>> {
    let mut log = Vec::new();

    while log.len() < max_moves {
        let Some(slot) = selector.select_move(game.board(), game.state()) else {
            break;
        };
        log.push(game.play(slot)?);
    }

    tracing::debug!(
        moves = log.len(),
        captured = log.iter().map(|m| m.captured.len()).sum::<usize>(),
        "playout finished"
    );
    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BoardConfigBuilder, BoardSize};
    use crate::rules::Player;

    fn small_game() -> GameController {
        let config = BoardConfigBuilder::new().board_size(BoardSize::Small).build().unwrap();
        GameController::new(config).unwrap()
    }

    #[test]
    fn test_playout_determinism() {
        let mut a = small_game();
        let mut b = small_game();

        let log_a = random_playout(&mut a, &mut RandomSelector::new(7), 60).unwrap();
        let log_b = random_playout(&mut b, &mut RandomSelector::new(7), 60).unwrap();

        assert_eq!(log_a, log_b);
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_playout_respects_move_cap() {
        let mut game = small_game();
        let log = random_playout(&mut game, &mut RandomSelector::new(1), 10).unwrap();

        assert_eq!(log.len(), 10);
        assert_eq!(game.state().move_number(), 10);
        assert_eq!(log[0].player, Player::One);
        assert_eq!(log[1].player, Player::Two);
    }

    struct Fixed(Vec<usize>);

    impl MoveSelector for Fixed {
        fn select_move(&mut self, _board: &BoardGraph, _state: &GameState) -> Option<usize> {
            self.0.pop()
        }
    }

    #[test]
    fn test_playout_stops_when_selector_is_exhausted() {
        let mut game = small_game();
        let log = random_playout(&mut game, &mut Fixed(vec![2, 1]), 50).unwrap();
        assert_eq!(log.iter().map(|m| m.placed).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_playout_propagates_invalid_selection() {
        let mut game = small_game();
        assert!(random_playout(&mut game, &mut Fixed(vec![4, 4]), 50).is_err());
        assert_eq!(game.state().move_number(), 1);
    }
}
