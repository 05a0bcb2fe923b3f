//! Cursor position on the grid.

use serde::{Deserialize, Serialize};

use crate::types::{Horizontal, MoveIntent, Vertical};

/// Grid coordinate of the cursor. Row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cursor {
    pub col: usize,
    pub row: usize,
}

impl Cursor {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Bottom-left cell of a grid with `height` rows
    pub fn bottom_left(height: usize) -> Self {
        Self::new(0, height.saturating_sub(1))
    }

    /// Move one cell per firing axis, staying inside `width` x `height`.
    ///
    /// An axis that would leave the grid is ignored; the other still applies.
    /// Returns true if the position changed.
    pub fn step(&mut self, intent: MoveIntent, width: usize, height: usize) -> bool {
        let mut changed = false;

        match intent.horizontal {
            Horizontal::Right if self.col + 1 < width => {
                self.col += 1;
                changed = true;
            }
            Horizontal::Left if self.col > 0 => {
                self.col -= 1;
                changed = true;
            }
            _ => {}
        }

        match intent.vertical {
            Vertical::Down if self.row + 1 < height => {
                self.row += 1;
                changed = true;
            }
            Vertical::Up if self.row > 0 => {
                self.row -= 1;
                changed = true;
            }
            _ => {}
        }

        changed
    }

    /// Pull the cursor back inside a (possibly smaller) grid
    pub fn clamp_to(&mut self, width: usize, height: usize) {
        self.col = self.col.min(width.saturating_sub(1));
        self.row = self.row.min(height.saturating_sub(1));
    }
}
