//! Host command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that
//! the session loop can dispatch on.

use log::warn;

use crate::board::Player;

/// A parsed host-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Protocol handshake.
    Hello,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a new game from the current options.
    NewGame,

    /// Load a position from its notation.
    Position { notation: String },

    /// Sow from a pit: `move <player> <pit>`.
    Move { player: Player, pit: usize },

    /// Report the position in notation.
    Board,

    /// Report both captured totals.
    Score,

    /// Report board and score as JSON.
    Snapshot,

    /// Restart the current game with the same geometry.
    Restart,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    match tokens[0] {
        "hello" => Some(Command::Hello),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "board" => Some(Command::Board),
        "score" => Some(Command::Score),
        "snapshot" => Some(Command::Snapshot),
        "restart" => Some(Command::Restart),

        "setoption" => parse_setoption(&tokens),
        "position" => parse_position(&tokens),
        "move" => parse_move(&tokens),

        other => {
            warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                warn!("malformed setoption: empty name");
                return None;
            }
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `position <notation>`.
fn parse_position(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        warn!("malformed position: expected 'position <notation>'");
        return None;
    }
    Some(Command::Position {
        notation: tokens[1].to_string(),
    })
}

/// Parses `move <player> <pit>`.
fn parse_move(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 3 {
        warn!("malformed move: expected 'move <player> <pit>'");
        return None;
    }
    let player = match Player::from_token(tokens[1]) {
        Some(p) => p,
        None => {
            warn!("unknown player: '{}'", tokens[1]);
            return None;
        }
    };
    match tokens[2].parse::<usize>() {
        Ok(pit) => Some(Command::Move { player, pit }),
        Err(_) => {
            warn!("invalid pit index: '{}'", tokens[2]);
            None
        }
    }
}
