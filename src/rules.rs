//! Capture rules over an arbitrary board graph
//!
//! Tracks each player's stones and connected-group labels, derives the set
//! of legal moves (liberty, suicide and single-step ko checks) and applies
//! moves with group merging and capture.
//!
//! Nothing here assumes a grid: every adjacency fact comes from
//! [`BoardGraph::neighbors`].

use std::collections::BTreeSet;
use std::ops::{Index, IndexMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::BoardGraph;
use crate::error::{MoveRejection, Result, SphereGoError};

/// One of the two players
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// Moves first
    One,
    /// Moves second
    Two,
}

impl Player {
    /// The other player
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    #[inline]
    fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

/// A value held once per player
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerPlayer<T>([T; 2]);

impl<T> PerPlayer<T> {
    /// Build from the values of player one and player two
    pub fn new(one: T, two: T) -> Self {
        Self([one, two])
    }
}

impl<T> Index<Player> for PerPlayer<T> {
    type Output = T;

    fn index(&self, player: Player) -> &T {
        &self.0[player.index()]
    }
}

impl<T> IndexMut<Player> for PerPlayer<T> {
    fn index_mut(&mut self, player: Player) -> &mut T {
        &mut self.0[player.index()]
    }
}

/// What a successful move changed, for a renderer to mirror
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Player who moved
    pub player: Player,
    /// Slot that received the new stone
    pub placed: usize,
    /// Slots whose enemy stones were captured, ascending
    pub captured: Vec<usize>,
}

/// Full state of one game on a fixed board
///
/// Group label 0 means "no stone of this player"; any positive label names
/// one maximal connected group. Labels are not kept contiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    occupied: PerPlayer<Vec<bool>>,
    groups: PerPlayer<Vec<u32>>,
    to_move: Player,
    prisoners: PerPlayer<usize>,
    valid: Vec<bool>,
    ko_blocked: Vec<bool>,
    /// Occupancy just before the previous move, for the ko check
    turn_start: Option<PerPlayer<Vec<bool>>>,
    move_number: usize,
}

impl GameState {
    /// Start a new game on `board`: empty, player one to move
    pub fn new(board: &BoardGraph) -> Self {
        let n = board.slot_count();
        let mut state = Self {
            occupied: PerPlayer::new(vec![false; n], vec![false; n]),
            groups: PerPlayer::new(vec![0; n], vec![0; n]),
            to_move: Player::One,
            prisoners: PerPlayer::default(),
            valid: vec![false; n],
            ko_blocked: vec![false; n],
            turn_start: None,
            move_number: 0,
        };
        state.refresh_valid_moves(board);
        state
    }

    /// Rebuild a state from stored group labels
    ///
    /// Occupancy is derived from the labels, valid moves recomputed. There
    /// is no ko snapshot, so the first move after a restore is never
    /// ko-blocked.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` when the arrays do not match the board,
    /// a slot is claimed by both players, or a player's labels do not name
    /// exactly one connected group each.
    pub fn from_groups(
        board: &BoardGraph,
        groups: PerPlayer<Vec<u32>>,
        to_move: Player,
        prisoners: PerPlayer<usize>,
    ) -> Result<Self> {
        let n = board.slot_count();
        for player in [Player::One, Player::Two] {
            if groups[player].len() != n {
                return Err(SphereGoError::InvalidConfiguration(format!(
                    "group labels for {:?} have {} entries, board has {} slots",
                    player,
                    groups[player].len(),
                    n
                )));
            }
        }
        if let Some(slot) = (0..n).find(|&s| groups[Player::One][s] > 0 && groups[Player::Two][s] > 0) {
            return Err(SphereGoError::InvalidConfiguration(format!(
                "slot {} is occupied by both players",
                slot
            )));
        }
        for player in [Player::One, Player::Two] {
            check_group_labels(board, player, &groups[player])?;
        }

        let occupied = PerPlayer::new(
            groups[Player::One].iter().map(|&g| g > 0).collect(),
            groups[Player::Two].iter().map(|&g| g > 0).collect(),
        );
        let mut state = Self {
            occupied,
            groups,
            to_move,
            prisoners,
            valid: vec![false; n],
            ko_blocked: vec![false; n],
            turn_start: None,
            move_number: 0,
        };
        state.refresh_valid_moves(board);
        Ok(state)
    }

    /// Player whose turn it is
    #[inline]
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Stones captured by `player` so far
    #[inline]
    pub fn prisoners(&self, player: Player) -> usize {
        self.prisoners[player]
    }

    /// Moves played since the game started
    #[inline]
    pub fn move_number(&self) -> usize {
        self.move_number
    }

    /// Occupancy of `player`, indexed by slot
    #[inline]
    pub fn occupancy(&self, player: Player) -> &[bool] {
        &self.occupied[player]
    }

    /// Group labels of `player`, indexed by slot
    #[inline]
    pub fn groups(&self, player: Player) -> &[u32] {
        &self.groups[player]
    }

    /// Who has a stone on `slot`, if anyone
    pub fn stone_at(&self, slot: usize) -> Option<Player> {
        [Player::One, Player::Two]
            .into_iter()
            .find(|&p| self.groups[p].get(slot).is_some_and(|&g| g > 0))
    }

    /// Whether neither player has a stone on `slot`
    ///
    /// Returns `false` for a slot that is not on the board.
    #[inline]
    pub fn is_empty(&self, slot: usize) -> bool {
        self.groups[Player::One].get(slot) == Some(&0) && self.groups[Player::Two].get(slot) == Some(&0)
    }

    /// Whether the player to move may play `slot`
    #[inline]
    pub fn is_valid(&self, slot: usize) -> bool {
        self.valid.get(slot).copied().unwrap_or(false)
    }

    /// Whether `slot` is refused only because of ko this turn
    #[inline]
    pub fn is_ko_blocked(&self, slot: usize) -> bool {
        self.ko_blocked.get(slot).copied().unwrap_or(false)
    }

    /// Valid moves for the player to move, ascending
    pub fn valid_moves(&self) -> Vec<usize> {
        (0..self.valid.len()).filter(|&s| self.valid[s]).collect()
    }

    /// Per-slot validity mask
    #[inline]
    pub fn valid_mask(&self) -> &[bool] {
        &self.valid
    }

    /// Play `slot` for the player to move
    ///
    /// Places the stone, joins it to adjacent friendly groups under their
    /// lowest label, removes enemy groups left without a liberty and credits
    /// them as prisoners. The turn then passes and valid moves are
    /// recomputed for the opponent. On error the state is unchanged.
    ///
    /// # Arguments
    ///
    /// * `board` - The board this state was created for
    /// * `slot` - Slot ID to play
    ///
    /// # Returns
    ///
    /// `Result<MoveOutcome>` - Mover, placed slot and captured slots, or error
    ///
    /// # Example
    ///
    /// ```
    /// use sphere_go::*;
    ///
    /// let board = generate(3).unwrap();
    /// let mut state = GameState::new(&board);
    ///
    /// let outcome = state.apply_move(&board, 0).unwrap();
    /// assert_eq!(outcome.player, Player::One);
    /// assert!(outcome.captured.is_empty());
    /// assert!(state.apply_move(&board, 0).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `InvalidMove` when the slot is off the board, occupied, a
    /// suicide, or blocked by ko.
    pub fn apply_move(&mut self, board: &BoardGraph, slot: usize) -> Result<MoveOutcome> {
        let reason = if slot >= self.valid.len() {
            Some(MoveRejection::OutOfRange)
        } else if !self.is_empty(slot) {
            Some(MoveRejection::Occupied)
        } else if self.ko_blocked[slot] {
            Some(MoveRejection::Ko)
        } else if !self.valid[slot] {
            Some(MoveRejection::Suicide)
        } else {
            None
        };
        if let Some(reason) = reason {
            tracing::debug!(slot, ?reason, player = ?self.to_move, "move rejected");
            return Err(SphereGoError::InvalidMove { slot, reason });
        }

        let me = self.to_move;
        let them = me.opponent();

        let snapshot = self.occupied.clone();

        // Join the stone to its friendly neighbours, or start a new group
        let friendly = self.adjacent_labels(board, me, slot);
        let label = match friendly.first() {
            None => self.fresh_label(me),
            Some(&lowest) => {
                for g in self.groups[me].iter_mut() {
                    if friendly.contains(g) {
                        *g = lowest;
                    }
                }
                lowest
            }
        };
        self.groups[me][slot] = label;
        self.occupied[me][slot] = true;

        // Remove enemy groups left without a liberty
        let mut captured = Vec::new();
        for enemy in self.adjacent_labels(board, them, slot) {
            if self.liberties(board, them, enemy).is_empty() {
                for s in 0..self.groups[them].len() {
                    if self.groups[them][s] == enemy {
                        self.groups[them][s] = 0;
                        self.occupied[them][s] = false;
                        captured.push(s);
                    }
                }
            }
        }
        captured.sort_unstable();
        self.prisoners[me] += captured.len();

        tracing::debug!(
            slot,
            player = ?me,
            group = label,
            captured = captured.len(),
            "move applied"
        );

        self.turn_start = Some(snapshot);
        self.to_move = them;
        self.move_number += 1;
        self.refresh_valid_moves(board);

        Ok(MoveOutcome {
            player: me,
            placed: slot,
            captured,
        })
    }

    /// Non-mutating form of [`apply_move`](Self::apply_move)
    pub fn with_move(&self, board: &BoardGraph, slot: usize) -> Result<(GameState, MoveOutcome)> {
        let mut next = self.clone();
        let outcome = next.apply_move(board, slot)?;
        Ok((next, outcome))
    }

    /// Recompute the valid-move and ko masks for the player to move
    fn refresh_valid_moves(&mut self, board: &BoardGraph) {
        let me = self.to_move;
        let them = me.opponent();
        let n = board.slot_count();

        let mut valid = vec![false; n];
        let mut ko_blocked = vec![false; n];

        for slot in 0..n {
            if !self.is_empty(slot) {
                continue;
            }

            if board.neighbors(slot).iter().any(|&nb| self.is_empty(nb)) {
                valid[slot] = true;
            }

            // Enemy groups whose only liberty is this slot
            let doomed: Vec<u32> = self
                .adjacent_labels(board, them, slot)
                .into_iter()
                .filter(|&g| self.liberties(board, them, g).iter().all(|&l| l == slot))
                .collect();
            if !doomed.is_empty() {
                valid[slot] = true;
            }

            // A friendly liberty elsewhere keeps the joined group alive. The
            // liberty itself is playable for the same reason.
            for g in self.adjacent_labels(board, me, slot) {
                for liberty in self.liberties(board, me, g) {
                    if liberty != slot {
                        valid[slot] = true;
                        valid[liberty] = true;
                    }
                }
            }

            if !doomed.is_empty() && self.recreates_turn_start(slot, &doomed) {
                tracing::trace!(slot, player = ?me, "ko blocks recapture");
                ko_blocked[slot] = true;
            }
        }

        for slot in 0..n {
            valid[slot] &= !ko_blocked[slot];
        }

        self.valid = valid;
        self.ko_blocked = ko_blocked;
    }

    /// Whether playing `slot` and capturing `doomed` restores the position
    /// recorded before the opponent's last move
    fn recreates_turn_start(&self, slot: usize, doomed: &[u32]) -> bool {
        let Some(turn_start) = &self.turn_start else {
            return false;
        };
        let me = self.to_move;
        let them = me.opponent();

        (0..self.valid.len()).all(|s| {
            let mine = self.occupied[me][s] || s == slot;
            let theirs = self.occupied[them][s] && !doomed.contains(&self.groups[them][s]);
            turn_start[me][s] == mine && turn_start[them][s] == theirs
        })
    }

    /// Distinct labels of `player`'s groups next to `slot`, ascending
    fn adjacent_labels(&self, board: &BoardGraph, player: Player, slot: usize) -> Vec<u32> {
        board
            .neighbors(slot)
            .iter()
            .map(|&nb| self.groups[player][nb])
            .filter(|&g| g > 0)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Empty slots adjacent to any stone of `player`'s group `label`
    fn liberties(&self, board: &BoardGraph, player: Player, label: u32) -> BTreeSet<usize> {
        let labels = &self.groups[player];
        (0..labels.len())
            .filter(|&s| labels[s] == label)
            .flat_map(|s| board.neighbors(s).iter().copied())
            .filter(|&nb| self.is_empty(nb))
            .collect()
    }

    /// Smallest positive label not in use by `player`
    fn fresh_label(&self, player: Player) -> u32 {
        let used: BTreeSet<u32> = self.groups[player].iter().copied().filter(|&g| g > 0).collect();
        (1..).find(|g| !used.contains(g)).unwrap_or(1)
    }
}

/// Check that every positive label of `player` covers exactly one connected
/// group of that player's stones
fn check_group_labels(board: &BoardGraph, player: Player, labels: &[u32]) -> Result<()> {
    let mut visited = vec![false; labels.len()];
    let mut seen = BTreeSet::new();

    for start in 0..labels.len() {
        let label = labels[start];
        if label == 0 || visited[start] {
            continue;
        }
        if !seen.insert(label) {
            return Err(SphereGoError::InvalidConfiguration(format!(
                "label {} of {:?} names more than one group",
                label, player
            )));
        }

        visited[start] = true;
        let mut stack = vec![start];
        while let Some(slot) = stack.pop() {
            for &nb in board.neighbors(slot) {
                if labels[nb] == 0 || visited[nb] {
                    continue;
                }
                if labels[nb] != label {
                    return Err(SphereGoError::InvalidConfiguration(format!(
                        "slots {} and {} of {:?} are connected but labelled {} and {}",
                        slot, nb, player, label, labels[nb]
                    )));
                }
                visited[nb] = true;
                stack.push(nb);
            }
        }
    }

    Ok(())
}
