use serde::{Deserialize, Serialize};

use crate::cursor::Cursor;
use crate::types::{Block, GameOutcome};

/// Read-only copy of everything a renderer needs.
///
/// `cells` is column-major (`col * height + row`): 0 for an empty cell,
/// `kind + 1` for a block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<u8>,
    pub cursor: Cursor,
    pub score: u32,
    pub best_score: u32,
    pub num_blocks: usize,
    pub block_kinds: u8,
    pub game_over: bool,
    /// Banner text once the game is over ("YOU WON", "YOU LOST", ...)
    pub banner: Option<String>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.cells.clear();
        self.cursor = Cursor::default();
        self.score = 0;
        self.best_score = 0;
        self.num_blocks = 0;
        self.block_kinds = 0;
        self.game_over = false;
        self.banner = None;
    }

    /// Block at (col, row), None for empty or out-of-range cells
    pub fn block(&self, col: usize, row: usize) -> Option<Block> {
        if col >= self.width || row >= self.height {
            return None;
        }
        match self.cells.get(col * self.height + row).copied() {
            Some(0) | None => None,
            Some(v) => Some(Block::new(v - 1)),
        }
    }

    pub fn is_cursor(&self, col: usize, row: usize) -> bool {
        self.cursor.col == col && self.cursor.row == row
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }

    pub(crate) fn set_outcome(&mut self, outcome: Option<GameOutcome>) {
        self.game_over = outcome.is_some();
        match outcome {
            // Reuse the String across frames when the text is unchanged.
            Some(o) if self.banner.as_deref() == Some(o.banner()) => {}
            Some(o) => self.banner = Some(o.banner().to_string()),
            None => self.banner = None,
        }
    }
}
