//! relaykalah -- a relay-sowing Kalah engine speaking a line-oriented host protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr through the logger; set `RUST_LOG` to see them.

use std::io::{self, BufRead};
use std::process::ExitCode;

use log::error;

use relaykalah::protocol::parser::parse_command;
use relaykalah::session::Session;

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() -> ExitCode {
    env_logger::init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut session = Session::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match session.handle(cmd, &mut out) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                error!("failed to write response: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
