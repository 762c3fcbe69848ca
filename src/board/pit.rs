//! Pit snapshots.
//!
//! A `Pit` is the read-only view handed to hosts: which player owns it,
//! where it sits in that player's row, and how many seeds it holds.

use serde::{Deserialize, Serialize};

use super::player::Player;

/// One seed-holding slot, as seen from outside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pit {
    pub owner: Player,
    pub local_index: usize,
    pub seeds: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_json_shape() {
        let pit = Pit {
            owner: Player::One,
            local_index: 2,
            seeds: 4,
        };
        let json = serde_json::to_string(&pit).unwrap();
        assert_eq!(json, r#"{"owner":1,"local_index":2,"seeds":4}"#);
    }
}
