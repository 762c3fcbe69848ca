//! Host session state.
//!
//! Holds the engine for the game in progress and the option map collected
//! through `setoption`, and writes protocol responses for each command.

use std::collections::HashMap;
use std::io::{self, Write};

use log::{error, info, warn};
use serde::Serialize;

use crate::board::{Pit, Player, Score};
use crate::config::{
    GameConfig, DEFAULT_PITS_PER_SIDE, DEFAULT_SEEDS_PER_PIT, MAX_PITS_PER_SIDE,
    MAX_SEEDS_PER_PIT, OPTION_PITS_PER_SIDE, OPTION_SEEDS_PER_PIT,
};
use crate::engine::Engine;
use crate::error::MoveError;
use crate::protocol::notation::{encode_position, parse_position, PositionError};
use crate::protocol::parser::Command;
use crate::rules::Outcome;

/// Payload of the `snapshot` response.
#[derive(Debug, Serialize)]
struct Snapshot {
    pits: Vec<Pit>,
    score: Score,
    to_move: Player,
    game_over: bool,
    outcome: Option<Outcome>,
}

/// Holds the mutable state of the host between commands.
pub struct Session {
    pub engine: Engine,
    pub options: HashMap<String, String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session with a default 7×4 game in progress.
    pub fn new() -> Self {
        Session {
            engine: Engine::default(),
            options: HashMap::new(),
        }
    }

    /// Dispatches one parsed command. Returns `false` once the host asked to quit.
    pub fn handle<W: Write>(&mut self, cmd: Command, out: &mut W) -> io::Result<bool> {
        match cmd {
            Command::Hello => self.handle_hello(out)?,
            Command::IsReady => self.handle_isready(out)?,
            Command::SetOption { name, value } => self.set_option(name, value),
            Command::NewGame => self.new_game(),
            Command::Position { notation } => {
                if let Err(e) = self.set_position(&notation) {
                    error!("{}", e);
                }
            }
            Command::Move { player, pit } => self.handle_move(player, pit, out)?,
            Command::Board => self.handle_board(out)?,
            Command::Score => self.handle_score(out)?,
            Command::Snapshot => self.handle_snapshot(out)?,
            Command::Restart => self.engine.restart(),
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Sets a host option. Takes effect at the next `newgame`.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Starts a new game from the current options. Bad option values are
    /// logged and the current geometry is kept.
    pub fn new_game(&mut self) {
        match GameConfig::from_options(&self.options).and_then(Engine::new) {
            Ok(engine) => {
                info!(
                    "new game: {} pits per side, {} seeds per pit",
                    engine.config().pits_per_side,
                    engine.config().seeds_per_pit
                );
                self.engine = engine;
            }
            Err(e) => {
                warn!("newgame: {}; keeping current configuration", e);
                self.engine.restart();
            }
        }
    }

    /// Loads a position from its notation.
    pub fn set_position(&mut self, notation: &str) -> Result<(), PositionError> {
        let position = parse_position(notation)?;
        self.engine.load_position(position)?;
        Ok(())
    }

    /// Handles the protocol handshake: writes id, options and hellook.
    pub fn handle_hello<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name relaykalah")?;
        writeln!(out, "id version {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(
            out,
            "option name {} type spin default {} min 1 max {}",
            OPTION_PITS_PER_SIDE, DEFAULT_PITS_PER_SIDE, MAX_PITS_PER_SIDE
        )?;
        writeln!(
            out,
            "option name {} type spin default {} min 1 max {}",
            OPTION_SEEDS_PER_PIT, DEFAULT_SEEDS_PER_PIT, MAX_SEEDS_PER_PIT
        )?;
        writeln!(out, "hellook")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles `move <player> <pit>`: writes the event stream and the move
    /// summary, or `illegal <reason>`.
    pub fn handle_move<W: Write>(&mut self, player: Player, pit: usize, out: &mut W) -> io::Result<()> {
        match self.engine.attempt_move(player, pit) {
            Ok(report) => {
                for event in &report.events {
                    writeln!(out, "event {}", event)?;
                }
                writeln!(
                    out,
                    "moved captured {} next {}",
                    report.captured_this_turn, report.next_player
                )?;
                if let Some(outcome) = report.outcome {
                    writeln!(
                        out,
                        "gameover {} {} {}",
                        outcome.winner, outcome.score.player1, outcome.score.player2
                    )?;
                }
            }
            Err(MoveError::Illegal(reason)) => {
                writeln!(out, "illegal {}", reason.token())?;
            }
            Err(MoveError::InvalidState(e)) => {
                error!("move {} {}: {}", player, pit, e);
                writeln!(out, "illegal internal")?;
            }
        }
        out.flush()
    }

    /// Handles `board`: writes the position in notation.
    pub fn handle_board<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "board {}", encode_position(&self.engine.position()))?;
        out.flush()
    }

    /// Handles `score`.
    pub fn handle_score<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let score = self.engine.score();
        writeln!(out, "score {} {}", score.player1, score.player2)?;
        out.flush()
    }

    /// Handles `snapshot`: writes board and score as one line of JSON.
    pub fn handle_snapshot<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let snapshot = Snapshot {
            pits: self.engine.board_snapshot(),
            score: self.engine.score(),
            to_move: self.engine.current_player(),
            game_over: self.engine.is_game_over(),
            outcome: self.engine.outcome(),
        };
        let json = serde_json::to_string(&snapshot).map_err(io::Error::from)?;
        writeln!(out, "snapshot {}", json)?;
        out.flush()
    }
}
