//! Command line and environment handling for the `tilt-blocks` binary.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use serde::Serialize;

use crate::core::{
    load_best_score, load_game, ByteStore, FileStore, GameConfig, GameSnapshot, GameState,
};
use crate::types::MEM_SIZE;

pub const DEFAULT_SAVE_PATH: &str = "tilt-blocks.sav";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive game (default)
    Play,
    /// Print a save file as JSON
    Dump { path: PathBuf },
}

/// Parse arguments after the program name.
pub fn parse_args(args: &[String]) -> Result<Command> {
    let Some(first) = args.first() else {
        return Ok(Command::Play);
    };

    match first.as_str() {
        "play" => match args.get(1) {
            None => Ok(Command::Play),
            Some(other) => Err(anyhow!("play: unknown argument: {}", other)),
        },
        "dump" => {
            let path = args
                .get(1)
                .ok_or_else(|| anyhow!("dump: missing save file path"))?;
            if let Some(other) = args.get(2) {
                return Err(anyhow!("dump: unexpected argument: {}", other));
            }
            Ok(Command::Dump {
                path: PathBuf::from(path),
            })
        }
        other => Err(anyhow!("unknown command: {} (expected play or dump)", other)),
    }
}

/// Settings for an interactive run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub game: GameConfig,
    pub seed: u32,
    pub save_path: PathBuf,
    pub log_path: Option<PathBuf>,
}

impl RunConfig {
    /// Create from environment variables
    ///
    /// - grid: see [`GameConfig::from_env`]
    /// - `TILT_BLOCKS_SEED`: RNG seed (default: derived from the clock)
    /// - `TILT_BLOCKS_SAVE_PATH`: save file (default `tilt-blocks.sav`)
    /// - `TILT_BLOCKS_LOG_PATH`: log file; logging is off when unset
    pub fn from_env() -> Result<Self> {
        let game = GameConfig::from_env().context("invalid grid configuration")?;

        let seed = match env::var("TILT_BLOCKS_SEED") {
            Ok(s) => s
                .trim()
                .parse::<u32>()
                .map_err(|_| anyhow!("invalid TILT_BLOCKS_SEED value: {}", s))?,
            Err(_) => clock_seed(),
        };

        let save_path = env::var_os("TILT_BLOCKS_SAVE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_PATH));
        let log_path = env::var_os("TILT_BLOCKS_LOG_PATH").map(PathBuf::from);

        Ok(Self {
            game,
            seed,
            save_path,
            log_path,
        })
    }

    /// Store size for this grid, never below the standard region
    pub fn store_capacity(&self) -> usize {
        self.game.save_size().max(MEM_SIZE)
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

/// What `dump` prints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DumpReport {
    pub best_score: u32,
    /// The saved game, None when the store holds no save
    pub game: Option<GameSnapshot>,
}

pub fn dump_store<S: ByteStore>(store: &S) -> Result<DumpReport> {
    let best_score = load_best_score(store).context("read best score")?;
    let game = load_game(store)
        .context("read saved game")?
        .map(|saved| GameState::from_saved(saved).snapshot());
    Ok(DumpReport { best_score, game })
}

/// Read a save file and render it as pretty JSON
pub fn dump_file(path: &Path) -> Result<String> {
    let len = fs::metadata(path)
        .with_context(|| format!("cannot read {}", path.display()))?
        .len() as usize;
    let store = FileStore::open(path, len.max(MEM_SIZE))
        .with_context(|| format!("cannot open {}", path.display()))?;
    let report = dump_store(&store)?;
    Ok(serde_json::to_string_pretty(&report)?)
}
