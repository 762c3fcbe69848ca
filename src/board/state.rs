//! Board and score representation.
//!
//! The board is a single ring of `2N` pits: player 1's row (local 0..N-1)
//! followed by player 2's row (local 0..N-1). Sowing walks the ring in
//! increasing index order and wraps, so the last pit of player 2's row is
//! followed by the first pit of player 1's row.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use super::pit::Pit;
use super::player::{Player, ALL_PLAYERS};
use crate::error::InvalidStateError;

/// Seed counts for every pit on the ring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pits_per_side: usize,
    seeds: Vec<u32>,
}

impl Board {
    /// Creates a board with `seeds_per_pit` seeds in each of the `2 * pits_per_side` pits.
    pub fn new(pits_per_side: usize, seeds_per_pit: u32) -> Self {
        Board {
            pits_per_side,
            seeds: vec![seeds_per_pit; 2 * pits_per_side],
        }
    }

    /// Builds a board from two rows given in local-index order.
    ///
    /// Returns `None` if the rows differ in length or are empty.
    pub fn from_rows(row_one: &[u32], row_two: &[u32]) -> Option<Self> {
        if row_one.is_empty() || row_one.len() != row_two.len() {
            return None;
        }
        let mut seeds = Vec::with_capacity(row_one.len() * 2);
        seeds.extend_from_slice(row_one);
        seeds.extend_from_slice(row_two);
        Some(Board {
            pits_per_side: row_one.len(),
            seeds,
        })
    }

    /// Refills every pit with `seeds_per_pit` seeds.
    pub fn reset(&mut self, seeds_per_pit: u32) {
        self.seeds.iter_mut().for_each(|s| *s = seeds_per_pit);
    }

    /// Number of pits in each player's row.
    pub fn pits_per_side(&self) -> usize {
        self.pits_per_side
    }

    /// Number of pits on the whole ring.
    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    /// Returns true if the ring has no pits.
    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    fn check_index(&self, ring: usize) -> Result<(), InvalidStateError> {
        if ring < self.seeds.len() {
            Ok(())
        } else {
            Err(InvalidStateError::RingIndexOutOfRange {
                index: ring,
                len: self.seeds.len(),
            })
        }
    }

    /// Seeds in the pit at `ring`.
    pub fn seeds_at(&self, ring: usize) -> Result<u32, InvalidStateError> {
        self.check_index(ring)?;
        Ok(self.seeds[ring])
    }

    /// Overwrites the seed count of the pit at `ring`.
    pub fn set_seeds(&mut self, ring: usize, n: u32) -> Result<(), InvalidStateError> {
        self.check_index(ring)?;
        self.seeds[ring] = n;
        Ok(())
    }

    /// Adds one seed to the pit at `ring` and returns its new count.
    pub(crate) fn add_seed(&mut self, ring: usize) -> Result<u32, InvalidStateError> {
        self.check_index(ring)?;
        let now = self.seeds[ring]
            .checked_add(1)
            .ok_or(InvalidStateError::SeedOverflow)?;
        self.seeds[ring] = now;
        Ok(now)
    }

    /// Empties the pit at `ring` and returns what it held.
    pub(crate) fn take_seeds(&mut self, ring: usize) -> Result<u32, InvalidStateError> {
        self.check_index(ring)?;
        Ok(std::mem::take(&mut self.seeds[ring]))
    }

    /// Maps a player's local pit to its ring position.
    pub fn ring_index_of(&self, player: Player, local_index: usize) -> usize {
        match player {
            Player::One => local_index,
            Player::Two => self.pits_per_side + local_index,
        }
    }

    /// Ring position of the pit directly across the board.
    pub fn opposite(&self, ring: usize) -> usize {
        (self.seeds.len() - 1) - ring
    }

    /// Next ring position in sowing order.
    pub fn next(&self, ring: usize) -> usize {
        (ring + 1) % self.seeds.len()
    }

    /// Owner of the pit at `ring`.
    pub fn owner_of(&self, ring: usize) -> Player {
        if ring < self.pits_per_side {
            Player::One
        } else {
            Player::Two
        }
    }

    /// Position of the pit at `ring` within its owner's row.
    pub fn local_index_of(&self, ring: usize) -> usize {
        ring % self.pits_per_side
    }

    /// Seed counts of one player's row, in local-index order.
    pub fn row(&self, player: Player) -> &[u32] {
        let start = self.ring_index_of(player, 0);
        &self.seeds[start..start + self.pits_per_side]
    }

    fn row_mut(&mut self, player: Player) -> &mut [u32] {
        let start = self.ring_index_of(player, 0);
        &mut self.seeds[start..start + self.pits_per_side]
    }

    /// Returns true if every pit in the player's row is empty.
    pub fn is_side_empty(&self, player: Player) -> bool {
        self.row(player).iter().all(|&s| s == 0)
    }

    /// Empties the player's row and returns the seeds removed.
    pub(crate) fn clear_side(&mut self, player: Player) -> Result<u32, InvalidStateError> {
        let total = checked_sum(self.row(player))?;
        self.row_mut(player).iter_mut().for_each(|s| *s = 0);
        Ok(total)
    }

    /// Total seeds on the board.
    pub fn total_seeds(&self) -> Result<u32, InvalidStateError> {
        checked_sum(&self.seeds)
    }

    /// Read-only view of every pit in ring order.
    pub fn snapshot(&self) -> Vec<Pit> {
        self.seeds
            .iter()
            .enumerate()
            .map(|(ring, &seeds)| Pit {
                owner: self.owner_of(ring),
                local_index: self.local_index_of(ring),
                seeds,
            })
            .collect()
    }
}

fn checked_sum(counts: &[u32]) -> Result<u32, InvalidStateError> {
    counts
        .iter()
        .try_fold(0u32, |acc, &n| acc.checked_add(n))
        .ok_or(InvalidStateError::SeedOverflow)
}

/// Captured-seed totals for both players.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    pub player1: u32,
    pub player2: u32,
}

impl Score {
    /// Creates a score with the given totals.
    pub const fn new(player1: u32, player2: u32) -> Self {
        Score { player1, player2 }
    }

    /// Sum of both totals.
    pub fn total(&self) -> Result<u32, InvalidStateError> {
        self.player1
            .checked_add(self.player2)
            .ok_or(InvalidStateError::SeedOverflow)
    }

    /// Adds `amount` to `player`'s total.
    pub(crate) fn credit(&mut self, player: Player, amount: u32) -> Result<u32, InvalidStateError> {
        let now = self[player]
            .checked_add(amount)
            .ok_or(InvalidStateError::SeedOverflow)?;
        self[player] = now;
        Ok(now)
    }

    /// Iterates over (player, total) pairs in seating order.
    pub fn iter(&self) -> impl Iterator<Item = (Player, u32)> + '_ {
        ALL_PLAYERS.into_iter().map(move |p| (p, self[p]))
    }
}

impl Index<Player> for Score {
    type Output = u32;

    fn index(&self, player: Player) -> &u32 {
        match player {
            Player::One => &self.player1,
            Player::Two => &self.player2,
        }
    }
}

impl IndexMut<Player> for Score {
    fn index_mut(&mut self, player: Player) -> &mut u32 {
        match player {
            Player::One => &mut self.player1,
            Player::Two => &mut self.player2,
        }
    }
}
