//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation, persistence, terminal rendering).
//!
//! # Grid Dimensions
//!
//! The shipped configuration uses a fixed playfield:
//!
//! - **Width**: 16 columns (indexed 0-15, left to right)
//! - **Height**: 6 rows (indexed 0-5, top to bottom; blocks fall toward row 5)
//! - **Palette**: 3 to 5 block kinds, drawn per game
//!
//! # Persistence Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MEM_SIZE` | 1024 | Size of the byte-addressable save region |
//! | `EMPTY_CELL_SENTINEL` | 5 | Stored kind value for an empty cell |
//!
//! # Examples
//!
//! ```
//! use tilt_blocks_types::{Block, GameAction, Horizontal, MoveIntent, GRID_HEIGHT, GRID_WIDTH};
//!
//! let block = Block::new(2);
//! assert_eq!(block.kind(), 2);
//!
//! let action = GameAction::from_str("moveLeft").unwrap();
//! assert_eq!(action, GameAction::MoveLeft);
//! assert_eq!(action.move_intent().unwrap().horizontal, Horizontal::Left);
//!
//! assert!(MoveIntent::NONE.is_none());
//! assert_eq!(GRID_WIDTH, 16);
//! assert_eq!(GRID_HEIGHT, 6);
//! ```

/// Default grid width in cells (16 columns)
pub const GRID_WIDTH: usize = 16;

/// Default grid height in cells (6 rows)
pub const GRID_HEIGHT: usize = 6;

/// Smallest palette drawn for a randomized game
pub const MIN_RANDOM_BLOCK_KINDS: u8 = 3;

/// Largest palette size; also the number of colors the renderer knows about
pub const MAX_BLOCK_KINDS: u8 = 5;

/// Stored kind value marking an empty cell in a save.
///
/// Valid kinds are `0..MAX_BLOCK_KINDS`, so the first value past the palette is free.
pub const EMPTY_CELL_SENTINEL: u8 = MAX_BLOCK_KINDS;

/// Smallest group that can be removed by an activation
pub const MIN_GROUP_SIZE: usize = 2;

/// Size of the persistent byte region in bytes
pub const MEM_SIZE: usize = 1024;

/// Tilt magnitude (in g) an axis must exceed before the cursor moves
pub const MIN_TILT: f32 = 0.15;

/// A single colored tile. Identified only by its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    kind: u8,
}

impl Block {
    pub const fn new(kind: u8) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> u8 {
        self.kind
    }

    /// Reassign the kind (used when restoring a saved grid)
    pub fn set_kind(&mut self, kind: u8) {
        self.kind = kind;
    }

    /// True when both blocks have the same kind
    pub fn matches(&self, other: &Block) -> bool {
        self.kind == other.kind
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(Block)`: Cell holding a block
pub type Cell = Option<Block>;

/// Horizontal component of a cursor move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Horizontal {
    Left,
    Right,
    #[default]
    None,
}

/// Vertical component of a cursor move (Up = toward row 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Vertical {
    Up,
    Down,
    #[default]
    None,
}

/// A cursor move on two independent axes. Both may fire in the same call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveIntent {
    pub horizontal: Horizontal,
    pub vertical: Vertical,
}

impl MoveIntent {
    pub const NONE: MoveIntent = MoveIntent {
        horizontal: Horizontal::None,
        vertical: Vertical::None,
    };

    pub const fn new(horizontal: Horizontal, vertical: Vertical) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn is_none(&self) -> bool {
        self.horizontal == Horizontal::None && self.vertical == Vertical::None
    }
}

/// Intents accepted by the game session
///
/// These come from keyboard input, tilt sampling, or tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move cursor one column left
    MoveLeft,
    /// Move cursor one column right
    MoveRight,
    /// Move cursor one row up (toward row 0)
    MoveUp,
    /// Move cursor one row down
    MoveDown,
    /// Remove the group under the cursor
    Activate,
    /// Ask the front-end to show its menu
    OpenMenu,
    /// Save the running game
    SaveRequest,
    /// Load the saved game (if any)
    LoadRequest,
    /// Abandon the running game and start over
    NewGameRequest,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tilt_blocks_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("activate"), Some(GameAction::Activate));
    /// assert_eq!(GameAction::from_str("SAVE"), Some(GameAction::SaveRequest));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "moveup" => Some(GameAction::MoveUp),
            "movedown" => Some(GameAction::MoveDown),
            "activate" => Some(GameAction::Activate),
            "menu" | "openmenu" => Some(GameAction::OpenMenu),
            "save" => Some(GameAction::SaveRequest),
            "load" => Some(GameAction::LoadRequest),
            "newgame" => Some(GameAction::NewGameRequest),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveUp => "moveUp",
            GameAction::MoveDown => "moveDown",
            GameAction::Activate => "activate",
            GameAction::OpenMenu => "openMenu",
            GameAction::SaveRequest => "save",
            GameAction::LoadRequest => "load",
            GameAction::NewGameRequest => "newGame",
        }
    }

    /// The single-axis move this action stands for, if it is a move
    pub fn move_intent(&self) -> Option<MoveIntent> {
        match self {
            GameAction::MoveLeft => Some(MoveIntent::new(Horizontal::Left, Vertical::None)),
            GameAction::MoveRight => Some(MoveIntent::new(Horizontal::Right, Vertical::None)),
            GameAction::MoveUp => Some(MoveIntent::new(Horizontal::None, Vertical::Up)),
            GameAction::MoveDown => Some(MoveIntent::new(Horizontal::None, Vertical::Down)),
            _ => None,
        }
    }
}

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// Every block was removed
    Won,
    /// Blocks remain but no two adjacent blocks match
    Lost,
    /// The player asked for a new game
    Abandoned,
}

impl GameOutcome {
    /// Text shown over the grid once the game is over
    pub fn banner(&self) -> &'static str {
        match self {
            GameOutcome::Won => "YOU WON",
            GameOutcome::Lost => "YOU LOST",
            GameOutcome::Abandoned => "NEW GAME",
        }
    }
}
