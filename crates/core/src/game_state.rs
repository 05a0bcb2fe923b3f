//! Game state module - the grid simulation
//!
//! Ties together the board, cursor and score. One activation runs the whole
//! cycle synchronously: flood fill, removal, row-fall, column-pack, and the
//! end-condition check.

use crate::board::Board;
use crate::config::GameConfig;
use crate::cursor::Cursor;
use crate::persistence::SavedGame;
use crate::rng::SimpleRng;
use crate::snapshot::GameSnapshot;
use crate::types::{GameOutcome, MoveIntent, MIN_GROUP_SIZE};

/// Result of one activation. All zero when nothing was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeletionOutcome {
    pub removed: usize,
    pub score_delta: u32,
}

impl DeletionOutcome {
    pub fn is_noop(&self) -> bool {
        self.removed == 0
    }
}

/// Complete state of one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    cursor: Cursor,
    block_kinds: u8,
    /// Tracked separately from the board; equals `board.count_blocks()`
    /// between operations.
    num_blocks: usize,
    score: u32,
    best_score: u32,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Fill a fresh grid from `rng`
    pub fn new(config: &GameConfig, rng: &mut SimpleRng, best_score: u32) -> Self {
        let kinds = config.resolve_block_kinds(rng);
        let board = Board::filled(config.width(), config.height(), kinds, rng);
        Self::from_board(board, kinds, best_score)
    }

    /// Start a game on a prepared board. The cursor goes to the bottom-left
    /// cell and the end condition is evaluated right away.
    pub fn from_board(board: Board, block_kinds: u8, best_score: u32) -> Self {
        let mut state = Self {
            num_blocks: board.count_blocks(),
            cursor: Cursor::bottom_left(board.height()),
            board,
            block_kinds,
            score: 0,
            best_score,
            outcome: None,
        };
        state.check_end_condition();
        state
    }

    /// Rebuild a game from a save, cursor at the bottom-left cell
    pub fn from_saved(saved: SavedGame) -> Self {
        let mut state = Self::from_board(
            saved.board,
            saved.block_kinds,
            saved.best_score.unwrap_or(0),
        );
        state.score = saved.score;
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn block_kinds(&self) -> u8 {
        self.block_kinds
    }

    pub fn num_blocks(&self) -> usize {
        self.num_blocks
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn set_best_score(&mut self, best_score: u32) {
        self.best_score = best_score;
    }

    pub fn game_ended(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Place the cursor directly. Returns false (and leaves it) if out of bounds.
    pub fn set_cursor(&mut self, col: usize, row: usize) -> bool {
        if col >= self.width() || row >= self.height() {
            return false;
        }
        self.cursor = Cursor::new(col, row);
        true
    }

    /// Move the cursor one cell per firing axis. Returns true if it moved.
    pub fn move_cursor(&mut self, intent: MoveIntent) -> bool {
        let (w, h) = (self.width(), self.height());
        self.cursor.step(intent, w, h)
    }

    /// Remove the same-kind group under the cursor, then compact and check
    /// for the end of the game.
    ///
    /// Empty cells, lone blocks and finished games are no-ops.
    pub fn activate(&mut self) -> DeletionOutcome {
        if self.game_ended() {
            return DeletionOutcome::default();
        }

        let group = self
            .board
            .connected_group(self.cursor.col, self.cursor.row);
        if group.len() < MIN_GROUP_SIZE {
            return DeletionOutcome::default();
        }

        let Some(region) = self.board.remove(&group) else {
            return DeletionOutcome::default();
        };

        let removed = group.len();
        self.num_blocks -= removed;
        self.score = self.score.saturating_add(removed as u32);

        self.board.compact(region);
        debug_assert_eq!(self.num_blocks, self.board.count_blocks());

        log::debug!(
            "removed {} blocks at ({}, {}), {} left",
            removed,
            self.cursor.col,
            self.cursor.row,
            self.num_blocks
        );

        self.check_end_condition();

        DeletionOutcome {
            removed,
            score_delta: removed as u32,
        }
    }

    /// True while some pair of adjacent blocks still matches
    pub fn any_possibility_left(&self) -> bool {
        self.board.has_matching_pair()
    }

    fn check_end_condition(&mut self) {
        if self.num_blocks == 0 {
            self.outcome = Some(GameOutcome::Won);
        } else if !self.any_possibility_left() {
            self.outcome = Some(GameOutcome::Lost);
        }
        if let Some(outcome) = self.outcome {
            log::info!("game over ({:?}), score {}", outcome, self.score);
        }
    }

    /// End the game by request. A game that already ended keeps its outcome.
    pub fn abandon(&mut self) {
        if self.outcome.is_none() {
            self.outcome = Some(GameOutcome::Abandoned);
        }
    }

    /// Replace the running game with a loaded one.
    ///
    /// The cursor keeps its position where it still fits; the end condition is
    /// evaluated for the restored grid.
    pub fn restore(&mut self, saved: SavedGame) {
        self.board = saved.board;
        self.num_blocks = saved.num_blocks;
        self.block_kinds = saved.block_kinds;
        self.score = saved.score;
        if let Some(best) = saved.best_score {
            self.best_score = best;
        }
        self.cursor.clamp_to(self.board.width(), self.board.height());
        self.outcome = None;
        self.check_end_condition();
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.width();
        out.height = self.height();
        self.board.write_u8_cells(&mut out.cells);
        out.cursor = self.cursor;
        out.score = self.score;
        out.best_score = self.best_score;
        out.num_blocks = self.num_blocks;
        out.block_kinds = self.block_kinds;
        out.set_outcome(self.outcome);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
