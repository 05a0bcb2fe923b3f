//! Board module - the matrix of optional blocks
//!
//! Cells live in a flat vector in column-major order (`col * height + row`),
//! so a whole column is one contiguous slice and column swaps stay cheap.
//! Coordinates: (col, row) where col runs left to right and row runs top to
//! bottom. Blocks fall toward higher row indices.

use std::collections::VecDeque;
use std::fmt;

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;
use crate::types::{Block, Cell};

/// Grid position as (col, row)
pub type Pos = (usize, usize);

/// Bounding corner of a removal: compaction only has to look at
/// columns `most_left_col..width` and rows `0..=most_down_row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AffectedRegion {
    pub most_left_col: usize,
    pub most_down_row: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Create a board with every cell holding a random block of `kinds` kinds
    pub fn filled(width: usize, height: usize, kinds: u8, rng: &mut SimpleRng) -> Self {
        let mut board = Self::new(width, height);
        for cell in &mut board.cells {
            *cell = Some(rng.next_block(kinds));
        }
        board
    }

    /// Build from column-major cells. Returns None if the length does not match.
    pub fn from_columns(width: usize, height: usize, cells: Vec<Cell>) -> Option<Self> {
        if cells.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            cells,
        })
    }

    /// Build from text rows, top row first. Digits are block kinds, anything
    /// else is an empty cell. Handy for tests and debugging.
    ///
    /// ```
    /// use tilt_blocks_core::Board;
    ///
    /// let board = Board::from_rows(&["0.", "01"]);
    /// assert_eq!(board.width(), 2);
    /// assert_eq!(board.get(1, 0), Some(None));
    /// assert_eq!(board.get(1, 1).flatten().map(|b| b.kind()), Some(1));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut board = Self::new(width, height);
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let cell = ch.to_digit(10).map(|d| Block::new(d as u8));
                board.set(col, row, cell);
            }
        }
        board
    }

    #[inline(always)]
    fn index(&self, col: usize, row: usize) -> Option<usize> {
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(col * self.height + row)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at (col, row). Returns None if out of bounds.
    pub fn get(&self, col: usize, row: usize) -> Option<Cell> {
        self.index(col, row).map(|idx| self.cells[idx])
    }

    /// Block at (col, row), None when empty or out of bounds
    pub fn block(&self, col: usize, row: usize) -> Option<Block> {
        self.get(col, row).flatten()
    }

    /// Set cell at (col, row). Returns false if out of bounds.
    pub fn set(&mut self, col: usize, row: usize, cell: Cell) -> bool {
        match self.index(col, row) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn is_occupied(&self, col: usize, row: usize) -> bool {
        self.block(col, row).is_some()
    }

    /// Cells of one column, top row first
    pub fn column(&self, col: usize) -> &[Cell] {
        let start = col * self.height;
        &self.cells[start..start + self.height]
    }

    /// All cells, column-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn count_blocks(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// In-bounds 4-neighbours (right, left, down, up)
    fn neighbors(&self, col: usize, row: usize) -> ArrayVec<Pos, 4> {
        let mut out = ArrayVec::new();
        if col + 1 < self.width {
            out.push((col + 1, row));
        }
        if col > 0 {
            out.push((col - 1, row));
        }
        if row + 1 < self.height {
            out.push((col, row + 1));
        }
        if row > 0 {
            out.push((col, row - 1));
        }
        out
    }

    /// Breadth-first flood fill from (col, row) over 4-connected cells of the
    /// same kind. The start cell comes first; empty or out-of-bounds starts
    /// yield an empty group.
    pub fn connected_group(&self, col: usize, row: usize) -> Vec<Pos> {
        let mut group = Vec::new();
        let Some(start) = self.block(col, row) else {
            return group;
        };

        let mut visited = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();
        visited[col * self.height + row] = true;
        queue.push_back((col, row));
        group.push((col, row));

        while let Some((c, r)) = queue.pop_front() {
            for (nc, nr) in self.neighbors(c, r) {
                let idx = nc * self.height + nr;
                if visited[idx] {
                    continue;
                }
                visited[idx] = true;
                if self.cells[idx].is_some_and(|b| b.matches(&start)) {
                    queue.push_back((nc, nr));
                    group.push((nc, nr));
                }
            }
        }

        group
    }

    /// Clear every cell in `group` and return the region compaction must cover.
    /// Returns None for an empty group.
    pub fn remove(&mut self, group: &[Pos]) -> Option<AffectedRegion> {
        let mut region: Option<AffectedRegion> = None;
        for &(col, row) in group {
            self.set(col, row, None);
            let r = region.get_or_insert(AffectedRegion {
                most_left_col: col,
                most_down_row: row,
            });
            r.most_left_col = r.most_left_col.min(col);
            r.most_down_row = r.most_down_row.max(row);
        }
        region
    }

    /// Row-fall then column-pack over the affected region
    pub fn compact(&mut self, region: AffectedRegion) {
        self.settle_columns(region);
        self.pack_columns(region);
    }

    /// Let blocks fall inside rows `0..=most_down_row` of every column from
    /// `most_left_col` on. Uses a two-pointer pass per column, so blocks keep
    /// their top-to-bottom order.
    pub fn settle_columns(&mut self, region: AffectedRegion) {
        let AffectedRegion {
            most_left_col,
            most_down_row,
        } = region;
        if most_down_row == 0 || most_down_row >= self.height {
            return;
        }

        for col in most_left_col..self.width {
            let base = col * self.height;
            let mut write = most_down_row;
            for read in (0..=most_down_row).rev() {
                if self.cells[base + read].is_none() {
                    continue;
                }
                if read != write {
                    self.cells.swap(base + read, base + write);
                }
                // The last block may sit in row 0; nothing is written after it.
                write = write.saturating_sub(1);
            }
        }
    }

    /// Move columns whose bottom cell is empty to the right, keeping the order
    /// of the remaining columns. Only runs when the removal reached the
    /// bottom row, since otherwise no column can have emptied.
    ///
    /// Relies on `settle_columns` having run: a settled column is empty
    /// exactly when its bottom cell is.
    pub fn pack_columns(&mut self, region: AffectedRegion) {
        let bottom = self.height - 1;
        if region.most_down_row != bottom {
            return;
        }

        let mut write = region.most_left_col;
        for read in region.most_left_col..self.width {
            if self.cells[read * self.height + bottom].is_none() {
                continue;
            }
            if read != write {
                self.swap_columns(read, write);
            }
            write += 1;
        }
    }

    fn swap_columns(&mut self, a: usize, b: usize) {
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let h = self.height;
        let (left, right) = self.cells.split_at_mut(hi * h);
        left[lo * h..(lo + 1) * h].swap_with_slice(&mut right[..h]);
    }

    /// True if any two 4-adjacent blocks share a kind.
    ///
    /// Checking the right and lower neighbour of every block covers every
    /// adjacent pair once.
    pub fn has_matching_pair(&self) -> bool {
        for col in 0..self.width {
            for row in 0..self.height {
                let Some(block) = self.block(col, row) else {
                    continue;
                };
                let right = self.block(col + 1, row);
                let below = self.block(col, row + 1);
                if right.is_some_and(|b| b.matches(&block))
                    || below.is_some_and(|b| b.matches(&block))
                {
                    return true;
                }
            }
        }
        false
    }

    /// Write the grid as column-major bytes: 0 for empty, kind + 1 otherwise
    pub fn write_u8_cells(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(
            self.cells
                .iter()
                .map(|cell| cell.map(|b| b.kind() + 1).unwrap_or(0)),
        );
    }
}

impl fmt::Display for Board {
    /// One line per row, top first; digits for kinds, '.' for empty
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.width {
                match self.block(col, row) {
                    Some(b) => write!(f, "{}", b.kind())?,
                    None => write!(f, ".")?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(most_left_col: usize, most_down_row: usize) -> AffectedRegion {
        AffectedRegion {
            most_left_col,
            most_down_row,
        }
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(3, 2);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(0, 1), Some(1));
        assert_eq!(board.index(1, 0), Some(2));
        assert_eq!(board.index(2, 1), Some(5));
        assert_eq!(board.index(3, 0), None);
        assert_eq!(board.index(0, 2), None);
    }

    #[test]
    fn test_column_is_contiguous() {
        let board = Board::from_rows(&["01", "23"]);
        let col: Vec<_> = board.column(1).iter().map(|c| c.unwrap().kind()).collect();
        assert_eq!(col, vec![1, 3]);
    }

    #[test]
    fn test_neighbors_at_corner() {
        let board = Board::new(3, 3);
        let n = board.neighbors(0, 0);
        assert_eq!(n.len(), 2);
        assert!(n.contains(&(1, 0)));
        assert!(n.contains(&(0, 1)));
        assert_eq!(board.neighbors(1, 1).len(), 4);
    }

    #[test]
    fn test_display_roundtrip() {
        let rows = ["0.1", "221"];
        let board = Board::from_rows(&rows);
        assert_eq!(board.to_string(), "0.1\n221");
    }

    #[test]
    fn test_settle_keeps_order() {
        let mut board = Board::from_rows(&["0", "1", ".", "."]);
        board.settle_columns(region(0, 3));
        assert_eq!(board.to_string(), ".\n.\n0\n1");
    }

    #[test]
    fn test_settle_skipped_for_top_row() {
        let mut board = Board::from_rows(&[".1", "01"]);
        let before = board.clone();
        board.settle_columns(region(0, 0));
        assert_eq!(board, before);
    }

    #[test]
    fn test_swap_columns() {
        let mut board = Board::from_rows(&["012", "345"]);
        board.swap_columns(2, 0);
        assert_eq!(board.to_string(), "210\n543");
    }

    #[test]
    fn test_pack_moves_empty_columns_right() {
        let mut board = Board::from_rows(&["..1.2", ".31.4"]);
        board.pack_columns(region(0, 1));
        assert_eq!(board.to_string(), ".12..\n314..");
    }

    #[test]
    fn test_u8_cells() {
        let board = Board::from_rows(&["0.", "41"]);
        let mut out = Vec::new();
        board.write_u8_cells(&mut out);
        assert_eq!(out, vec![1, 5, 0, 2]);
    }
}
