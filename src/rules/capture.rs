//! Single-seed capture.

use crate::board::{Board, Player, Score};
use crate::error::InvalidStateError;

/// Applies the capture rule to the pit a sowing pass ended in.
///
/// A capture happens when the landing pit holds exactly one seed, belongs to
/// `player`, and the pit across from it is not empty. Both pits are emptied
/// and their seeds credited to `player`. Returns the amount captured, or 0.
pub fn check_capture(
    board: &mut Board,
    score: &mut Score,
    ring: usize,
    player: Player,
) -> Result<u32, InvalidStateError> {
    if board.seeds_at(ring)? != 1 || board.owner_of(ring) != player {
        return Ok(0);
    }

    let opposite = board.opposite(ring);
    let across = board.seeds_at(opposite)?;
    if across == 0 {
        return Ok(0);
    }

    let amount = across.checked_add(1).ok_or(InvalidStateError::SeedOverflow)?;
    score.credit(player, amount)?;
    board.set_seeds(opposite, 0)?;
    board.set_seeds(ring, 0)?;
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_opposite_plus_landing_seed() {
        let mut board = Board::from_rows(&[0, 0, 0, 0, 0, 0, 1], &[3, 0, 0, 0, 0, 0, 0]).unwrap();
        let mut score = Score::default();
        let amount = check_capture(&mut board, &mut score, 6, Player::One).unwrap();
        assert_eq!(amount, 4);
        assert_eq!(score, Score::new(4, 0));
        assert_eq!(board.seeds_at(6), Ok(0));
        assert_eq!(board.seeds_at(7), Ok(0));
    }

    #[test]
    fn no_capture_in_opponent_pit() {
        let mut board = Board::from_rows(&[0, 0, 5], &[1, 0, 0]).unwrap();
        let mut score = Score::default();
        assert_eq!(check_capture(&mut board, &mut score, 3, Player::One), Ok(0));
        assert_eq!(board.seeds_at(3), Ok(1));
        assert_eq!(board.seeds_at(2), Ok(5));
        assert_eq!(score.total(), Ok(0));
    }

    #[test]
    fn no_capture_when_opposite_is_empty() {
        let mut board = Board::from_rows(&[1, 0, 0], &[0, 0, 0]).unwrap();
        let mut score = Score::default();
        assert_eq!(check_capture(&mut board, &mut score, 0, Player::One), Ok(0));
        assert_eq!(board.seeds_at(0), Ok(1));
    }

    #[test]
    fn no_capture_with_more_than_one_seed() {
        let mut board = Board::from_rows(&[2, 0, 0], &[0, 0, 4]).unwrap();
        let mut score = Score::default();
        assert_eq!(check_capture(&mut board, &mut score, 0, Player::One), Ok(0));
        assert_eq!(board.total_seeds(), Ok(6));
    }

    #[test]
    fn player_two_captures_on_own_row() {
        let mut board = Board::from_rows(&[0, 6, 0], &[0, 1, 0]).unwrap();
        let mut score = Score::new(2, 3);
        assert_eq!(check_capture(&mut board, &mut score, 4, Player::Two), Ok(7));
        assert_eq!(score, Score::new(2, 10));
        assert_eq!(board.total_seeds(), Ok(0));
    }

    #[test]
    fn score_overflow_leaves_pits_alone() {
        let mut board = Board::from_rows(&[1, 0], &[0, 5]).unwrap();
        let mut score = Score::new(u32::MAX, 0);
        assert_eq!(
            check_capture(&mut board, &mut score, 0, Player::One),
            Err(InvalidStateError::SeedOverflow)
        );
        assert_eq!(score, Score::new(u32::MAX, 0));
        assert_eq!(board.seeds_at(0), Ok(1));
        assert_eq!(board.seeds_at(3), Ok(5));
    }
}
