//! Move events.
//!
//! Every accepted move comes back with the ordered list of things that
//! happened while it resolved. The engine's state already reflects the end
//! of the move when the list is handed out, so a presentation layer can
//! replay it at whatever pace it likes, or not at all.
//!
//! Pit positions in events are ring indices.

use serde::{Deserialize, Serialize};

use crate::board::Player;
use crate::rules::Outcome;

/// One discrete step of a resolved move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    /// The mover lifted all seeds from the chosen pit.
    MoveStarted { player: Player, pit: usize, seeds: u32 },

    /// One seed dropped into `pit`, which now holds `seeds`.
    SeedPlaced { pit: usize, seeds: u32 },

    /// A single-seed landing captured `amount` seeds.
    Capture {
        player: Player,
        pit: usize,
        opposite: usize,
        amount: u32,
    },

    /// The landing pit held more than one seed; they were lifted and sowing continues.
    RelayStarted { pit: usize, seeds: u32 },

    /// The relay pass budget ran out with `seeds` left in the landing pit.
    RelayHalted { pit: usize, seeds: u32, passes: u32 },

    /// It is now `player`'s turn.
    TurnSwitched { player: Player },

    /// End of game: `amount` seeds left on `player`'s row went to their score.
    EndSweep { player: Player, amount: u32 },

    GameOver { outcome: Outcome },
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::MoveStarted { player, pit, seeds } => write!(f, "start {} {} {}", player, pit, seeds),
            Event::SeedPlaced { pit, seeds } => write!(f, "seed {} {}", pit, seeds),
            Event::Capture {
                player,
                pit,
                opposite,
                amount,
            } => write!(f, "capture {} {} {} {}", player, pit, opposite, amount),
            Event::RelayStarted { pit, seeds } => write!(f, "relay {} {}", pit, seeds),
            Event::RelayHalted { pit, seeds, passes } => write!(f, "halt {} {} {}", pit, seeds, passes),
            Event::TurnSwitched { player } => write!(f, "turn {}", player),
            Event::EndSweep { player, amount } => write!(f, "sweep {} {}", player, amount),
            Event::GameOver { outcome } => write!(
                f,
                "gameover {} {} {}",
                outcome.winner, outcome.score.player1, outcome.score.player2
            ),
        }
    }
}
