//! Board representation.
//!
//! Contains the players, the pit snapshot type, the ring of pits with its
//! per-player captured totals, and whole-game positions.

pub mod pit;
pub mod player;
pub mod position;
pub mod state;

pub use pit::Pit;
pub use player::{Player, ALL_PLAYERS};
pub use position::Position;
pub use state::{Board, Score};
