//! Core game logic - pure, deterministic, and testable
//!
//! Everything about the grid lives here: filling it, moving the cursor,
//! removing groups of matching blocks, compacting what is left, deciding when
//! the game is over, and saving it all to a small byte-addressable store.
//! Nothing in this crate draws to a screen or reads a device.
//!
//! # Module Structure
//!
//! - [`board`]: column-major matrix of optional blocks, flood fill and compaction
//! - [`game_state`]: one game: board, cursor, score, best score, outcome
//! - [`session`]: drives a game from player actions, owns the store
//! - [`persistence`]: fixed-offset save layout
//! - [`store`]: byte stores (in-memory and file-backed)
//! - [`config`]: validated grid dimensions and palette size
//! - [`rng`]: explicit seeded randomness
//!
//! # Rules
//!
//! - Activating a block removes it together with every 4-connected block of
//!   the same kind, provided the group has at least two blocks. One point per
//!   removed block.
//! - Blocks then fall down inside their column, and columns that became empty
//!   move to the right.
//! - The game is won when the grid is empty and lost when no two adjacent
//!   blocks match.
//!
//! # Example
//!
//! ```
//! use tilt_blocks_core::{Board, GameState};
//!
//! let mut game = GameState::from_board(Board::from_rows(&["012", "002"]), 3, 0);
//!
//! // cursor starts bottom-left, on a group of three 0s
//! let outcome = game.activate();
//! assert_eq!(outcome.removed, 3);
//! assert_eq!(game.score(), 3);
//! assert_eq!(game.board().to_string(), ".2.\n12.");
//! ```

pub mod board;
pub mod config;
pub mod cursor;
pub mod error;
pub mod game_state;
pub mod persistence;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod store;

pub use tilt_blocks_types as types;

// Re-export commonly used types for convenience
pub use board::{AffectedRegion, Board, Pos};
pub use config::GameConfig;
pub use cursor::Cursor;
pub use error::{CodecError, ConfigError, StoreError};
pub use game_state::{DeletionOutcome, GameState};
pub use persistence::{load_best_score, load_game, save_best_score, save_game, SavedGame};
pub use rng::SimpleRng;
pub use session::{ActionOutcome, Session};
pub use snapshot::GameSnapshot;
pub use store::{ByteStore, FileStore, MemoryStore};
