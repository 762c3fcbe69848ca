//! relaykalah engine library.
//!
//! Exposes the board representation, the sowing rules, the turn controller,
//! and the host protocol modules for use by integration tests and the binary
//! entry points.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod playout;
pub mod protocol;
pub mod rules;
pub mod session;
