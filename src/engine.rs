//! Turn controller.
//!
//! Holds one game: board, captured totals, the player to move, and the turn
//! state machine
//!
//! ```text
//! AwaitingMove(p) -> Resolving -> AwaitingMove(p.other()) | GameOver(outcome)
//! ```
//!
//! A move is resolved against a scratch copy of the board and score and only
//! committed once it has fully resolved, so a rejected or failed move leaves
//! the engine exactly as it was.

use log::{debug, error, trace, warn};

use crate::board::{Board, Pit, Player, Position, Score};
use crate::config::{ConfigError, GameConfig};
use crate::error::{IllegalMove, InvalidStateError, MoveError};
use crate::event::Event;
use crate::rules::{check_capture, check_game_end, sow_with, Outcome};

/// Where the engine is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    AwaitingMove(Player),
    /// A move is in flight; new move requests are rejected.
    Resolving,
    /// The board is frozen until restart.
    GameOver(Outcome),
}

/// Result of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub player: Player,
    pub local_index: usize,
    /// Seeds captured by this move (end sweep excluded).
    pub captured_this_turn: u32,
    /// Sowing passes, counting the initial one.
    pub relay_passes: u32,
    /// True if relaying stopped because the pass budget ran out.
    pub relay_halted: bool,
    pub events: Vec<Event>,
    pub next_player: Player,
    pub game_over: bool,
    pub outcome: Option<Outcome>,
}

/// What a single move did to the scratch board.
struct Resolution {
    captured: u32,
    passes: u32,
    halted: bool,
    events: Vec<Event>,
}

/// A single game of relay Kalah.
#[derive(Debug, Clone)]
pub struct Engine {
    config: GameConfig,
    board: Board,
    score: Score,
    current_player: Player,
    state: TurnState,
    last_capture_amount: u32,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::from_valid_config(GameConfig::default())
    }
}

impl Engine {
    /// Starts a new game with the given configuration.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Engine::from_valid_config(config))
    }

    fn from_valid_config(config: GameConfig) -> Self {
        Engine {
            config,
            board: Board::new(config.pits_per_side, config.seeds_per_pit),
            score: Score::default(),
            current_player: Player::One,
            state: TurnState::AwaitingMove(Player::One),
            last_capture_amount: 0,
        }
    }

    /// Starts a game from an arbitrary position.
    ///
    /// `seeds_per_pit` is taken from `config` and only matters on restart.
    pub fn from_position(config: GameConfig, position: Position) -> Result<Self, InvalidStateError> {
        let mut engine = Engine::from_valid_config(config);
        engine.load_position(position)?;
        Ok(engine)
    }

    /// Replaces the current game with `position`.
    ///
    /// The end-of-game check runs immediately, so a position with an empty
    /// row ends the game on load. Positions holding more seeds in total than
    /// a `u32` can count are rejected and the current game is kept.
    pub fn load_position(&mut self, position: Position) -> Result<(), InvalidStateError> {
        position.seed_count()?;
        let Position {
            mut board,
            mut score,
            to_move,
        } = position;

        let state = match check_game_end(&mut board, &mut score)? {
            Some(outcome) => {
                debug!("loaded finished position: winner {}", outcome.winner);
                TurnState::GameOver(outcome)
            }
            None => TurnState::AwaitingMove(to_move),
        };
        self.config.pits_per_side = board.pits_per_side();
        self.current_player = to_move;
        self.last_capture_amount = 0;
        self.state = state;
        self.board = board;
        self.score = score;
        Ok(())
    }

    /// Resets board, score and turn for a fresh game with the same configuration.
    pub fn restart(&mut self) {
        *self = Engine::from_valid_config(self.config);
        debug!(
            "restarted: {} pits per side, {} seeds per pit",
            self.config.pits_per_side, self.config.seeds_per_pit
        );
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Every pit in ring order.
    pub fn board_snapshot(&self) -> Vec<Pit> {
        self.board.snapshot()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Seeds captured by the most recent accepted move.
    pub fn last_capture_amount(&self) -> u32 {
        self.last_capture_amount
    }

    /// The busy/idle flag: true while a move is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self.state, TurnState::Resolving)
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.state, TurnState::GameOver(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            TurnState::GameOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// The current game as a resumable position.
    pub fn position(&self) -> Position {
        Position {
            board: self.board.clone(),
            score: self.score,
            to_move: self.current_player,
        }
    }

    /// Local indices of the pits the player to move may sow from.
    ///
    /// Empty when the engine is busy or the game is over.
    pub fn legal_moves(&self) -> Vec<usize> {
        match self.state {
            TurnState::AwaitingMove(player) => self
                .board
                .row(player)
                .iter()
                .enumerate()
                .filter(|(_, &seeds)| seeds > 0)
                .map(|(i, _)| i)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Marks the engine busy so a host can hold input while it plays back events.
    ///
    /// Returns false (and does nothing) unless the engine is awaiting a move.
    pub fn suspend_input(&mut self) -> bool {
        match self.state {
            TurnState::AwaitingMove(_) => {
                self.state = TurnState::Resolving;
                true
            }
            _ => false,
        }
    }

    /// Clears a hold placed by [`Engine::suspend_input`].
    pub fn resume_input(&mut self) {
        if self.is_busy() {
            self.state = TurnState::AwaitingMove(self.current_player);
        }
    }

    /// Checks a move request against the current state; returns the ring index to sow from.
    fn validate_move(&self, player: Player, local_index: usize) -> Result<usize, IllegalMove> {
        let current = match self.state {
            TurnState::Resolving => return Err(IllegalMove::Busy),
            TurnState::GameOver(_) => return Err(IllegalMove::GameOver),
            TurnState::AwaitingMove(current) => current,
        };
        if player != current {
            return Err(IllegalMove::NotYourTurn { player, current });
        }
        let pits_per_side = self.board.pits_per_side();
        if local_index >= pits_per_side {
            return Err(IllegalMove::PitOutOfRange {
                index: local_index,
                pits_per_side,
            });
        }
        let ring = self.board.ring_index_of(player, local_index);
        if self.board.row(player)[local_index] == 0 {
            return Err(IllegalMove::EmptyPit {
                player,
                index: local_index,
            });
        }
        Ok(ring)
    }

    /// Plays `player`'s pit `local_index` as one atomic move.
    pub fn attempt_move(&mut self, player: Player, local_index: usize) -> Result<MoveReport, MoveError> {
        let start = match self.validate_move(player, local_index) {
            Ok(ring) => ring,
            Err(reason) => {
                warn!("rejected move {} {}: {}", player, local_index, reason);
                return Err(reason.into());
            }
        };

        let previous = std::mem::replace(&mut self.state, TurnState::Resolving);
        let mut board = self.board.clone();
        let mut score = self.score;

        let resolution = match resolve_move(&mut board, &mut score, player, start) {
            Ok(r) => r,
            Err(e) => {
                error!("move {} {} hit an invalid state: {}", player, local_index, e);
                self.state = previous;
                return Err(e.into());
            }
        };

        let Resolution {
            captured,
            passes,
            halted,
            mut events,
        } = resolution;

        let next_player = player.other();
        events.push(Event::TurnSwitched { player: next_player });

        let outcome = match check_game_end(&mut board, &mut score) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("move {} {} hit an invalid state: {}", player, local_index, e);
                self.state = previous;
                return Err(e.into());
            }
        };
        if let Some(outcome) = outcome {
            for (p, amount) in outcome.swept.iter() {
                if amount > 0 {
                    events.push(Event::EndSweep { player: p, amount });
                }
            }
            events.push(Event::GameOver { outcome });
        }

        self.board = board;
        self.score = score;
        self.current_player = next_player;
        self.last_capture_amount = captured;
        self.state = match outcome {
            Some(outcome) => TurnState::GameOver(outcome),
            None => TurnState::AwaitingMove(next_player),
        };

        debug!(
            "player {} sowed pit {}: {} passes, captured {}, score {}-{}",
            player, local_index, passes, captured, score.player1, score.player2
        );
        if let Some(outcome) = outcome {
            debug!(
                "game over: winner {} ({}-{})",
                outcome.winner, outcome.score.player1, outcome.score.player2
            );
        }

        Ok(MoveReport {
            player,
            local_index,
            captured_this_turn: captured,
            relay_passes: passes,
            relay_halted: halted,
            events,
            next_player,
            game_over: outcome.is_some(),
            outcome,
        })
    }
}

/// Sows from `start` and keeps relaying until a landing pit ends with at most
/// one seed, or the pass budget (seeds on the board at move start) runs out.
fn resolve_move(
    board: &mut Board,
    score: &mut Score,
    player: Player,
    start: usize,
) -> Result<Resolution, InvalidStateError> {
    let budget = board.total_seeds()?;
    let mut events = Vec::new();

    let mut seeds = board.take_seeds(start)?;
    events.push(Event::MoveStarted {
        player,
        pit: start,
        seeds,
    });

    let mut position = start;
    let mut captured = 0;
    let mut passes = 0;
    let mut halted = false;

    loop {
        passes += 1;
        let landing = sow_with(board, position, seeds, |pit, now| {
            events.push(Event::SeedPlaced { pit, seeds: now });
        })?;

        let amount = check_capture(board, score, landing, player)?;
        if amount > 0 {
            captured += amount;
            events.push(Event::Capture {
                player,
                pit: landing,
                opposite: board.opposite(landing),
                amount,
            });
        }

        let remaining = board.seeds_at(landing)?;
        if remaining <= 1 {
            break;
        }
        if passes >= budget {
            warn!(
                "relay halted after {} passes with {} seeds in pit {}",
                passes, remaining, landing
            );
            events.push(Event::RelayHalted {
                pit: landing,
                seeds: remaining,
                passes,
            });
            halted = true;
            break;
        }

        seeds = board.take_seeds(landing)?;
        trace!("relay from pit {} with {} seeds", landing, seeds);
        events.push(Event::RelayStarted { pit: landing, seeds });
        position = landing;
    }

    Ok(Resolution {
        captured,
        passes,
        halted,
        events,
    })
}
