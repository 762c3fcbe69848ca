//! End-of-game detection and winner determination.
//!
//! The game ends as soon as either row is completely empty. Whatever is
//! left in the other row is swept into that row's own owner's score.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Player, Score, ALL_PLAYERS};
use crate::error::InvalidStateError;

/// Who won a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Player(Player),
    Tie,
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::Player(p) => write!(f, "{}", p),
            Winner::Tie => write!(f, "tie"),
        }
    }
}

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Outcome {
    /// Final captured totals, including the sweep.
    pub score: Score,
    /// Seeds each player received from the end sweep.
    pub swept: Score,
    pub winner: Winner,
}

/// Higher score wins; equal scores tie.
pub fn determine_winner(score: &Score) -> Winner {
    match score.player1.cmp(&score.player2) {
        std::cmp::Ordering::Greater => Winner::Player(Player::One),
        std::cmp::Ordering::Less => Winner::Player(Player::Two),
        std::cmp::Ordering::Equal => Winner::Tie,
    }
}

/// Ends the game if either row is empty.
///
/// Both rows are inspected regardless of whose turn it is. On a finish the
/// non-empty row (if any) is emptied into its owner's score and the outcome
/// is returned; otherwise, or on error, board and score are untouched.
pub fn check_game_end(
    board: &mut Board,
    score: &mut Score,
) -> Result<Option<Outcome>, InvalidStateError> {
    let empty = ALL_PLAYERS.map(|p| board.is_side_empty(p));
    if !empty.iter().any(|&e| e) {
        return Ok(None);
    }

    let mut cleared = board.clone();
    let mut final_score = *score;
    let mut swept = Score::default();
    for player in ALL_PLAYERS {
        if !empty[player.index()] {
            let seeds = cleared.clear_side(player)?;
            swept[player] = seeds;
            final_score.credit(player, seeds)?;
        }
    }

    *board = cleared;
    *score = final_score;
    Ok(Some(Outcome {
        score: final_score,
        swept,
        winner: determine_winner(&final_score),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_continues_while_both_rows_have_seeds() {
        let mut board = Board::from_rows(&[0, 1], &[2, 0]).unwrap();
        let mut score = Score::new(3, 4);
        assert_eq!(check_game_end(&mut board, &mut score), Ok(None));
        assert_eq!(board.total_seeds(), Ok(3));
        assert_eq!(score, Score::new(3, 4));
    }

    #[test]
    fn sweeps_the_nonempty_row_into_its_owner() {
        let mut board = Board::from_rows(&[0, 0, 0], &[2, 0, 5]).unwrap();
        let mut score = Score::new(10, 1);
        let outcome = check_game_end(&mut board, &mut score).unwrap().unwrap();
        assert_eq!(outcome.swept, Score::new(0, 7));
        assert_eq!(outcome.score, Score::new(10, 8));
        assert_eq!(outcome.winner, Winner::Player(Player::One));
        assert_eq!(score, Score::new(10, 8));
        assert_eq!(board.total_seeds(), Ok(0));
    }

    #[test]
    fn sweep_overflow_leaves_board_and_score_alone() {
        let mut board = Board::from_rows(&[0, 0], &[2, 0]).unwrap();
        let mut score = Score::new(0, u32::MAX - 1);
        assert_eq!(
            check_game_end(&mut board, &mut score),
            Err(InvalidStateError::SeedOverflow)
        );
        assert_eq!(board.seeds_at(2), Ok(2));
        assert_eq!(score, Score::new(0, u32::MAX - 1));
    }

    #[test]
    fn own_seeds_are_swept_even_when_own_row_remains() {
        // Player 2's row is empty, so player 1 keeps everything left on theirs.
        let mut board = Board::from_rows(&[4, 4], &[0, 0]).unwrap();
        let mut score = Score::new(0, 6);
        let outcome = check_game_end(&mut board, &mut score).unwrap().unwrap();
        assert_eq!(outcome.swept, Score::new(8, 0));
        assert_eq!(outcome.winner, Winner::Player(Player::One));
    }

    #[test]
    fn both_rows_empty_sweeps_nothing() {
        let mut board = Board::new(3, 0);
        let mut score = Score::new(12, 12);
        let outcome = check_game_end(&mut board, &mut score).unwrap().unwrap();
        assert_eq!(outcome.swept, Score::default());
        assert_eq!(outcome.winner, Winner::Tie);
    }

    #[test]
    fn winner_by_score() {
        assert_eq!(determine_winner(&Score::new(30, 26)), Winner::Player(Player::One));
        assert_eq!(determine_winner(&Score::new(20, 36)), Winner::Player(Player::Two));
        assert_eq!(determine_winner(&Score::new(28, 28)), Winner::Tie);
    }

    #[test]
    fn winner_display_and_json() {
        assert_eq!(Winner::Player(Player::Two).to_string(), "2");
        assert_eq!(Winner::Tie.to_string(), "tie");
        assert_eq!(serde_json::to_string(&Winner::Tie).unwrap(), r#""tie""#);
        assert_eq!(
            serde_json::to_string(&Winner::Player(Player::One)).unwrap(),
            r#"{"player":1}"#
        );
    }
}
