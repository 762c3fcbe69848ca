//! Host protocol handling.
//!
//! This module implements the line-oriented text protocol spoken on stdin and
//! stdout by the `relaykalah` binary: the command parser for the main loop
//! and the compact position notation used by `position` and `board`.

pub mod notation;
pub mod parser;

pub use notation::{encode_position, parse_position, PositionError};
pub use parser::{parse_command, Command};
