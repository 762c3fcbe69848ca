//! Engine error types.
//!
//! `IllegalMove` is the recoverable, caller-facing rejection: nothing was
//! mutated and the host may simply try again. `InvalidStateError` signals a
//! broken internal invariant and means there is a bug in the engine.

use serde::Serialize;
use thiserror::Error;

use crate::board::Player;

/// Reasons a move request is rejected before any state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum IllegalMove {
    #[error("engine is busy resolving a move")]
    Busy,

    #[error("game is over")]
    GameOver,

    #[error("not player {player}'s turn (player {current} to move)")]
    NotYourTurn { player: Player, current: Player },

    #[error("pit {index} out of range (0..{pits_per_side})")]
    PitOutOfRange { index: usize, pits_per_side: usize },

    #[error("pit {index} of player {player} is empty")]
    EmptyPit { player: Player, index: usize },
}

impl IllegalMove {
    /// Returns the short protocol token for this rejection.
    pub const fn token(&self) -> &'static str {
        match self {
            IllegalMove::Busy => "busy",
            IllegalMove::GameOver => "gameover",
            IllegalMove::NotYourTurn { .. } => "notyourturn",
            IllegalMove::PitOutOfRange { .. } => "outofrange",
            IllegalMove::EmptyPit { .. } => "emptypit",
        }
    }
}

/// A broken internal invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidStateError {
    #[error("ring index {index} out of range for a ring of {len} pits")]
    RingIndexOutOfRange { index: usize, len: usize },

    #[error("seed count overflowed")]
    SeedOverflow,
}

/// Everything `Engine::attempt_move` can fail with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("illegal move: {0}")]
    Illegal(#[from] IllegalMove),

    #[error("invalid engine state: {0}")]
    InvalidState(#[from] InvalidStateError),
}

impl MoveError {
    /// Returns the rejection reason if this is an ordinary illegal move.
    pub fn illegal(&self) -> Option<IllegalMove> {
        match self {
            MoveError::Illegal(reason) => Some(*reason),
            MoveError::InvalidState(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_move_messages() {
        let e = IllegalMove::NotYourTurn {
            player: Player::Two,
            current: Player::One,
        };
        assert_eq!(e.to_string(), "not player 2's turn (player 1 to move)");

        let e = IllegalMove::PitOutOfRange {
            index: 9,
            pits_per_side: 7,
        };
        assert_eq!(e.to_string(), "pit 9 out of range (0..7)");
        assert_eq!(e.token(), "outofrange");
    }

    #[test]
    fn move_error_wraps_both_kinds() {
        let e: MoveError = IllegalMove::Busy.into();
        assert_eq!(e.illegal(), Some(IllegalMove::Busy));
        assert_eq!(e.to_string(), "illegal move: engine is busy resolving a move");

        let e: MoveError = InvalidStateError::RingIndexOutOfRange { index: 20, len: 14 }.into();
        assert_eq!(e.illegal(), None);
        assert!(e.to_string().contains("ring index 20"));
    }

    #[test]
    fn illegal_move_serializes_with_reason_tag() {
        let json = serde_json::to_string(&IllegalMove::EmptyPit {
            player: Player::One,
            index: 4,
        })
        .unwrap();
        assert_eq!(json, r#"{"reason":"empty_pit","player":1,"index":4}"#);
    }
}
