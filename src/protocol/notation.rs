//! Position notation.
//!
//! A compact one-line encoding of a full position, in the spirit of chess
//! FEN:
//!
//! ```text
//! <player 1 pits>/<player 2 pits>/<score 1>,<score 2>/<to move>
//! ```
//!
//! Pit lists are comma-separated seed counts in local-index order. The
//! opening 7×4 position is `4,4,4,4,4,4,4/4,4,4,4,4,4,4/0,0/1`.

use crate::board::{Board, Player, Position, Score};
use crate::config::{MAX_PITS_PER_SIDE, MAX_SEEDS_PER_PIT};
use crate::error::InvalidStateError;

/// Errors that can occur while parsing position notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("expected 4 sections separated by '/', got {0}")]
    WrongSectionCount(usize),

    #[error("invalid seed count: '{0}'")]
    InvalidSeedCount(String),

    #[error("pit holds {count} seeds, at most {max} allowed")]
    TooManySeeds { count: u32, max: u32 },

    #[error("rows differ in length: {one} pits for player 1, {two} for player 2")]
    RowLengthMismatch { one: usize, two: usize },

    #[error("row must have between 1 and {max} pits, got {got}")]
    BadRowLength { got: usize, max: usize },

    #[error("invalid score section: '{0}'")]
    InvalidScore(String),

    #[error("invalid player to move: '{0}'")]
    InvalidPlayer(String),

    #[error("position is not playable: {0}")]
    Unplayable(#[from] InvalidStateError),
}

fn parse_row(s: &str) -> Result<Vec<u32>, PositionError> {
    s.split(',')
        .map(|entry| {
            let count = entry
                .trim()
                .parse::<u32>()
                .map_err(|_| PositionError::InvalidSeedCount(entry.to_string()))?;
            if count > MAX_SEEDS_PER_PIT {
                return Err(PositionError::TooManySeeds {
                    count,
                    max: MAX_SEEDS_PER_PIT,
                });
            }
            Ok(count)
        })
        .collect()
}

fn parse_score(s: &str) -> Result<Score, PositionError> {
    let invalid = || PositionError::InvalidScore(s.to_string());
    let (one, two) = s.split_once(',').ok_or_else(invalid)?;
    let player1 = one.trim().parse::<u32>().map_err(|_| invalid())?;
    let player2 = two.trim().parse::<u32>().map_err(|_| invalid())?;
    Ok(Score::new(player1, player2))
}

/// Parses a position from its notation.
///
/// Pits may hold at most `MAX_SEEDS_PER_PIT` seeds, and board plus scores
/// must total no more than `u32::MAX`.
pub fn parse_position(s: &str) -> Result<Position, PositionError> {
    let sections: Vec<&str> = s.trim().split('/').collect();
    if sections.len() != 4 {
        return Err(PositionError::WrongSectionCount(sections.len()));
    }

    let row_one = parse_row(sections[0])?;
    let row_two = parse_row(sections[1])?;
    if row_one.len() != row_two.len() {
        return Err(PositionError::RowLengthMismatch {
            one: row_one.len(),
            two: row_two.len(),
        });
    }
    if row_one.len() > MAX_PITS_PER_SIDE {
        return Err(PositionError::BadRowLength {
            got: row_one.len(),
            max: MAX_PITS_PER_SIDE,
        });
    }
    let board = Board::from_rows(&row_one, &row_two).ok_or(PositionError::BadRowLength {
        got: row_one.len(),
        max: MAX_PITS_PER_SIDE,
    })?;

    let score = parse_score(sections[2])?;
    let to_move = Player::from_token(sections[3].trim())
        .ok_or_else(|| PositionError::InvalidPlayer(sections[3].to_string()))?;

    let position = Position {
        board,
        score,
        to_move,
    };
    position.seed_count()?;
    Ok(position)
}

fn encode_row(row: &[u32]) -> String {
    row.iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Encodes a position into its notation.
pub fn encode_position(position: &Position) -> String {
    format!(
        "{}/{}/{},{}/{}",
        encode_row(position.board.row(Player::One)),
        encode_row(position.board.row(Player::Two)),
        position.score.player1,
        position.score.player2,
        position.to_move
    )
}
