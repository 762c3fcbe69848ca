//! Sowing rules.
//!
//! Pure operations over a `Board` and `Score`: distributing seeds around the
//! ring, the single-seed capture, and the end-of-game sweep. None of these
//! know whose turn it is beyond the player passed in; sequencing a whole
//! move is the engine's job.

pub mod capture;
pub mod end;
pub mod sow;

pub use capture::check_capture;
pub use end::{check_game_end, determine_winner, Outcome, Winner};
pub use sow::{sow, sow_with};
