//! Game controller
//!
//! Owns the board and the game state and sequences turns, new games and
//! board reconfiguration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::BoardGraph;
use crate::config::{BoardConfig, BoardConfigBuilder};
use crate::error::{Result, SphereGoError};
use crate::rules::{GameState, MoveOutcome, PerPlayer, Player};

/// Saved game: enough to rebuild board and position
///
/// The board itself is not stored; it is regenerated from `complexity`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Subdivision complexity of the board
    pub complexity: usize,
    /// Occupancy per player, indexed by slot
    pub occupancy: PerPlayer<Vec<bool>>,
    /// Group labels per player, indexed by slot
    pub groups: PerPlayer<Vec<u32>>,
    /// Player to move
    pub to_move: Player,
    /// Prisoners per player
    pub prisoners: PerPlayer<usize>,
}

/// Turn sequencing over a generated board
///
/// Every call runs to completion; hosts that receive input concurrently
/// should funnel it through a single owner of the controller.
///
/// # Example
///
/// ```
/// use sphere_go::*;
///
/// let config = BoardConfigBuilder::new()
///     .board_size(BoardSize::Small)
///     .build()
///     .unwrap();
///
/// let mut game = GameController::new(config).unwrap();
/// let slot = game.valid_moves()[0];
/// let outcome = game.play(slot).unwrap();
/// assert_eq!(outcome.player, Player::One);
/// assert_eq!(game.state().to_move(), Player::Two);
/// ```
#[derive(Debug, Clone)]
pub struct GameController {
    config: BoardConfig,
    board: BoardGraph,
    state: GameState,
}

impl GameController {
    /// Generate the board for `config` and start a game on it
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for an unsupported complexity.
    pub fn new(config: BoardConfig) -> Result<Self> {
        let board = BoardGraph::generate(config)?;
        let state = GameState::new(&board);
        Ok(Self {
            config,
            board,
            state,
        })
    }

    /// Configuration of the current board
    #[inline]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// The current board
    #[inline]
    pub fn board(&self) -> &BoardGraph {
        &self.board
    }

    /// The current game state
    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Valid moves for the player to move
    pub fn valid_moves(&self) -> Vec<usize> {
        self.state.valid_moves()
    }

    /// Reset to an empty board, keeping the generated board
    pub fn new_game(&mut self) {
        self.state = GameState::new(&self.board);
        tracing::debug!(slots = self.board.slot_count(), "new game");
    }

    /// Regenerate the board at a new complexity and start a new game
    ///
    /// On error nothing changes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if complexity is outside `[3, 7]`.
    pub fn reconfigure(&mut self, complexity: usize) -> Result<()> {
        let config = BoardConfigBuilder::new().complexity(complexity)?.build()?;
        self.board = BoardGraph::generate(config)?;
        self.config = config;
        self.new_game();
        Ok(())
    }

    /// Play `slot` for the player to move
    ///
    /// # Errors
    ///
    /// Returns `InvalidMove` if the slot is not currently valid; the game is
    /// left as it was.
    pub fn play(&mut self, slot: usize) -> Result<MoveOutcome> {
        self.state.apply_move(&self.board, slot)
    }

    /// Handle one completed pick from the input side
    ///
    /// `None` means the gesture ended away from any slot and is ignored.
    pub fn select(&mut self, pick: Option<usize>) -> Result<Option<MoveOutcome>> {
        pick.map(|slot| self.play(slot)).transpose()
    }

    /// Capture the position for saving
    pub fn snapshot(&self) -> GameSnapshot {
        let state = &self.state;
        GameSnapshot {
            complexity: self.config.complexity(),
            occupancy: PerPlayer::new(
                state.occupancy(Player::One).to_vec(),
                state.occupancy(Player::Two).to_vec(),
            ),
            groups: PerPlayer::new(
                state.groups(Player::One).to_vec(),
                state.groups(Player::Two).to_vec(),
            ),
            to_move: state.to_move(),
            prisoners: PerPlayer::new(state.prisoners(Player::One), state.prisoners(Player::Two)),
        }
    }

    /// Rebuild a controller from a snapshot
    ///
    /// The ko snapshot is not saved, so no move is ko-blocked right after a
    /// restore.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for an unsupported complexity, arrays
    /// that do not fit the board, or occupancy that disagrees with the
    /// group labels.
    pub fn restore(snapshot: GameSnapshot) -> Result<Self> {
        let config = BoardConfigBuilder::new().complexity(snapshot.complexity)?.build()?;
        let board = BoardGraph::generate(config)?;

        for player in [Player::One, Player::Two] {
            let occupancy = &snapshot.occupancy[player];
            let groups = &snapshot.groups[player];
            if occupancy.len() != groups.len()
                || occupancy.iter().zip(groups).any(|(&o, &g)| o != (g > 0))
            {
                return Err(SphereGoError::InvalidConfiguration(format!(
                    "occupancy of {:?} does not match its group labels",
                    player
                )));
            }
        }

        let state = GameState::from_groups(&board, snapshot.groups, snapshot.to_move, snapshot.prisoners)?;
        Ok(Self {
            config,
            board,
            state,
        })
    }
}
