//! Game configuration.
//!
//! A `GameConfig` fixes the board geometry for a game. Hosts build one
//! directly, deserialize it, or derive it from the string option map the
//! protocol session collects through `setoption`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of pits in each player's row.
pub const DEFAULT_PITS_PER_SIDE: usize = 7;

/// Default number of seeds placed in every pit at the start of a game.
pub const DEFAULT_SEEDS_PER_PIT: u32 = 4;

/// Upper bound on pits per side accepted from configuration.
pub const MAX_PITS_PER_SIDE: usize = 64;

/// Upper bound on seeds per pit accepted from configuration.
pub const MAX_SEEDS_PER_PIT: u32 = 1000;

/// Option name for the row length.
pub const OPTION_PITS_PER_SIDE: &str = "PitsPerSide";

/// Option name for the starting seeds per pit.
pub const OPTION_SEEDS_PER_PIT: &str = "SeedsPerPit";

/// Errors raised for unusable configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    #[error("invalid value for option {name}: '{value}'")]
    InvalidOption { name: String, value: String },
}

/// Board geometry for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub pits_per_side: usize,
    pub seeds_per_pit: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            pits_per_side: DEFAULT_PITS_PER_SIDE,
            seeds_per_pit: DEFAULT_SEEDS_PER_PIT,
        }
    }
}

impl GameConfig {
    /// Creates a configuration without validating it.
    pub const fn new(pits_per_side: usize, seeds_per_pit: u32) -> Self {
        GameConfig {
            pits_per_side,
            seeds_per_pit,
        }
    }

    /// Checks that both values are within the supported range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pits_per_side == 0 || self.pits_per_side > MAX_PITS_PER_SIDE {
            return Err(ConfigError::OutOfRange {
                name: OPTION_PITS_PER_SIDE,
                value: self.pits_per_side as u64,
                min: 1,
                max: MAX_PITS_PER_SIDE as u64,
            });
        }
        if self.seeds_per_pit == 0 || self.seeds_per_pit > MAX_SEEDS_PER_PIT {
            return Err(ConfigError::OutOfRange {
                name: OPTION_SEEDS_PER_PIT,
                value: u64::from(self.seeds_per_pit),
                min: 1,
                max: u64::from(MAX_SEEDS_PER_PIT),
            });
        }
        Ok(())
    }

    /// Builds a validated configuration from protocol options.
    ///
    /// Missing options fall back to the defaults; other entries in the map
    /// are ignored.
    pub fn from_options(options: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = GameConfig::default();
        if let Some(v) = options.get(OPTION_PITS_PER_SIDE) {
            config.pits_per_side = parse_option(OPTION_PITS_PER_SIDE, v)?;
        }
        if let Some(v) = options.get(OPTION_SEEDS_PER_PIT) {
            config.seeds_per_pit = parse_option(OPTION_SEEDS_PER_PIT, v)?;
        }
        config.validate()?;
        Ok(config)
    }
}

fn parse_option<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse::<T>().map_err(|_| ConfigError::InvalidOption {
        name: name.to_string(),
        value: value.to_string(),
    })
}
