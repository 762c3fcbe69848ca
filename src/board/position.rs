//! Full game positions.
//!
//! A `Position` is everything needed to resume a game: the pits, both
//! captured totals, and the player to move.

use serde::{Deserialize, Serialize};

use super::player::Player;
use super::state::{Board, Score};
use crate::error::InvalidStateError;

/// A resumable game state: pits, captured totals and the player to move.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub board: Board,
    pub score: Score,
    pub to_move: Player,
}

impl Position {
    /// The opening position: uniform pits, no captures, player 1 to move.
    pub fn initial(pits_per_side: usize, seeds_per_pit: u32) -> Self {
        Position {
            board: Board::new(pits_per_side, seeds_per_pit),
            score: Score::default(),
            to_move: Player::One,
        }
    }

    /// Seeds on the board plus seeds already captured.
    ///
    /// Fails if the total does not fit in a `u32`. A position whose total
    /// fits can never overflow during play, since moves only redistribute
    /// seeds.
    pub fn seed_count(&self) -> Result<u32, InvalidStateError> {
        self.board
            .total_seeds()?
            .checked_add(self.score.total()?)
            .ok_or(InvalidStateError::SeedOverflow)
    }
}
