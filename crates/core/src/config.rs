//! Grid configuration
//!
//! A `GameConfig` can only be built through validating constructors, so an
//! invalid grid (zero dimensions, palette out of range) is rejected up front
//! and never reaches `GameState`.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rng::SimpleRng;
use crate::types::{GRID_HEIGHT, GRID_WIDTH, MAX_BLOCK_KINDS};

/// Grid shape and palette for new games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    width: usize,
    height: usize,
    /// Fixed palette size; `None` draws 3..=5 for every new game
    block_kinds: Option<u8>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            block_kinds: None,
        }
    }
}

impl GameConfig {
    /// Config with a fixed palette size
    pub fn new(width: usize, height: usize, block_kinds: u8) -> Result<Self, ConfigError> {
        Self::build(width, height, Some(block_kinds))
    }

    /// Config whose palette size is drawn per game
    pub fn randomized(width: usize, height: usize) -> Result<Self, ConfigError> {
        Self::build(width, height, None)
    }

    fn build(width: usize, height: usize, block_kinds: Option<u8>) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidDimensions { width, height });
        }
        if let Some(kinds) = block_kinds {
            if kinds == 0 || kinds > MAX_BLOCK_KINDS {
                return Err(ConfigError::InvalidBlockKinds {
                    kinds,
                    max: MAX_BLOCK_KINDS,
                });
            }
        }
        Ok(Self {
            width,
            height,
            block_kinds,
        })
    }

    /// Create from environment variables
    ///
    /// - `TILT_BLOCKS_WIDTH` / `TILT_BLOCKS_HEIGHT`: grid size (default 16x6)
    /// - `TILT_BLOCKS_KINDS`: fixed palette size (default: random 3..=5 per game)
    ///
    /// A variable that is set but does not parse is an error, as is a parsed
    /// value outside the valid range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`GameConfig::from_env`] over an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let width = parse_var(&lookup, "TILT_BLOCKS_WIDTH")?.unwrap_or(GRID_WIDTH);
        let height = parse_var(&lookup, "TILT_BLOCKS_HEIGHT")?.unwrap_or(GRID_HEIGHT);
        let kinds = parse_var::<u8, _>(&lookup, "TILT_BLOCKS_KINDS")?;

        Self::build(width, height, kinds)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn block_kinds(&self) -> Option<u8> {
        self.block_kinds
    }

    /// Palette size for the next game
    pub fn resolve_block_kinds(&self, rng: &mut SimpleRng) -> u8 {
        match self.block_kinds {
            Some(kinds) => kinds,
            None => rng.next_palette_size(),
        }
    }

    /// Bytes a save of this grid occupies
    pub fn save_size(&self) -> usize {
        crate::persistence::required_capacity(self.width, self.height)
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value }),
    }
}
