//! Seed distribution.

use crate::board::Board;
use crate::error::InvalidStateError;

/// Sows `seed_count` seeds one per pit starting after `start`.
///
/// Returns the ring index of the last pit seeded, or `start` unchanged when
/// `seed_count` is zero. The start pit only receives a seed again once the
/// distribution has wrapped all the way around the ring.
pub fn sow(board: &mut Board, start: usize, seed_count: u32) -> Result<usize, InvalidStateError> {
    sow_with(board, start, seed_count, |_, _| {})
}

/// Like [`sow`], calling `on_seed(ring, new_count)` after each placement.
pub fn sow_with<F>(
    board: &mut Board,
    start: usize,
    seed_count: u32,
    mut on_seed: F,
) -> Result<usize, InvalidStateError>
where
    F: FnMut(usize, u32),
{
    board.seeds_at(start)?;

    let mut ring = start;
    for _ in 0..seed_count {
        ring = board.next(ring);
        let now = board.add_seed(ring)?;
        on_seed(ring, now);
    }
    Ok(ring)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sows_into_following_pits() {
        let mut board = Board::new(7, 4);
        board.set_seeds(3, 0).unwrap();
        let end = sow(&mut board, 3, 4).unwrap();
        assert_eq!(end, 7);
        for ring in 4..=7 {
            assert_eq!(board.seeds_at(ring), Ok(5));
        }
        assert_eq!(board.seeds_at(3), Ok(0));
        assert_eq!(board.seeds_at(8), Ok(4));
    }

    #[test]
    fn wraps_past_the_last_pit() {
        let mut board = Board::new(2, 0);
        let end = sow(&mut board, 2, 3).unwrap();
        assert_eq!(end, 1);
        assert_eq!(board.snapshot().iter().map(|p| p.seeds).collect::<Vec<_>>(), vec![1, 1, 0, 1]);
    }

    #[test]
    fn full_lap_reseeds_the_start_pit() {
        let mut board = Board::new(2, 0);
        let end = sow(&mut board, 0, 5).unwrap();
        assert_eq!(end, 1);
        assert_eq!(board.seeds_at(0), Ok(1));
        assert_eq!(board.seeds_at(1), Ok(2));
    }

    #[test]
    fn zero_seeds_is_a_no_op() {
        let mut board = Board::new(7, 4);
        let before = board.clone();
        assert_eq!(sow(&mut board, 5, 0), Ok(5));
        assert_eq!(board, before);
    }

    #[test]
    fn out_of_range_start_is_invalid_state() {
        let mut board = Board::new(7, 4);
        assert!(sow(&mut board, 14, 3).is_err());
        assert_eq!(board.total_seeds(), Ok(56));
    }

    #[test]
    fn reports_each_placement() {
        let mut board = Board::new(3, 1);
        let mut placed = Vec::new();
        sow_with(&mut board, 4, 3, |ring, now| placed.push((ring, now))).unwrap();
        assert_eq!(placed, vec![(5, 2), (0, 2), (1, 2)]);
    }
}
