//! Save-game codec over a [`ByteStore`]
//!
//! Fixed-offset layout, all integers 32-bit little-endian:
//!
//! | Offset      | Size  | Field                                    |
//! |-------------|-------|------------------------------------------|
//! | 0           | 1     | save present flag                        |
//! | 1           | 4     | score                                    |
//! | 5           | 1     | best score present flag                  |
//! | 6           | 4     | best score                               |
//! | 10          | 4     | width                                    |
//! | 14          | 4     | height                                   |
//! | 18          | 4·w·h | block kinds, column-major, 5 = empty     |
//! | 18 + 4·w·h  | 4     | block count                              |
//! | 22 + 4·w·h  | 4     | palette size                             |
//!
//! The best-score bytes belong to [`save_best_score`] alone; saving a game
//! never touches them.

use crate::board::Board;
use crate::error::CodecError;
use crate::game_state::GameState;
use crate::store::ByteStore;
use crate::types::{Block, Cell, EMPTY_CELL_SENTINEL, MAX_BLOCK_KINDS};

pub const HAS_SAVE_ADDR: usize = 0;
pub const SCORE_ADDR: usize = 1;
pub const HAS_BEST_ADDR: usize = 5;
pub const BEST_SCORE_ADDR: usize = 6;
pub const WIDTH_ADDR: usize = 10;
pub const HEIGHT_ADDR: usize = 14;
pub const CELLS_ADDR: usize = 18;

const CELL_BYTES: usize = 4;

/// Bytes needed to save a `width` x `height` grid
pub const fn required_capacity(width: usize, height: usize) -> usize {
    CELLS_ADDR + CELL_BYTES * width * height + 8
}

fn num_blocks_addr(width: usize, height: usize) -> usize {
    CELLS_ADDR + CELL_BYTES * width * height
}

/// A game read back from a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedGame {
    pub board: Board,
    pub num_blocks: usize,
    pub block_kinds: u8,
    pub score: u32,
    /// Best score stored next to the game, if one was ever recorded
    pub best_score: Option<u32>,
}

fn to_i32<T>(value: T, what: &str) -> Result<i32, CodecError>
where
    T: TryInto<i32> + Copy + std::fmt::Display,
{
    value
        .try_into()
        .map_err(|_| CodecError::Corrupt(format!("{what} {value} does not fit")))
}

/// Write the running game and commit.
///
/// Checks capacity before the first write, so a grid that does not fit leaves
/// the store untouched.
pub fn save_game<S: ByteStore>(state: &GameState, store: &mut S) -> Result<(), CodecError> {
    let (width, height) = (state.width(), state.height());
    let required = required_capacity(width, height);
    if required > store.capacity() {
        return Err(CodecError::Capacity {
            required,
            capacity: store.capacity(),
        });
    }

    // Convert everything up front so a value that does not fit writes nothing.
    let score = to_i32(state.score(), "score")?;
    let width_field = to_i32(width, "width")?;
    let height_field = to_i32(height, "height")?;
    let num_blocks = to_i32(state.num_blocks(), "block count")?;

    store.write_byte(HAS_SAVE_ADDR, 1)?;
    store.write_i32(SCORE_ADDR, score)?;
    store.write_i32(WIDTH_ADDR, width_field)?;
    store.write_i32(HEIGHT_ADDR, height_field)?;

    let mut addr = CELLS_ADDR;
    for cell in state.board().cells() {
        let value = match cell {
            Some(block) => block.kind(),
            None => EMPTY_CELL_SENTINEL,
        };
        store.write_i32(addr, i32::from(value))?;
        addr += CELL_BYTES;
    }

    store.write_i32(addr, num_blocks)?;
    store.write_i32(addr + 4, i32::from(state.block_kinds()))?;
    store.commit()?;

    log::info!(
        "saved {}x{} game, score {}, {} blocks",
        width,
        height,
        state.score(),
        state.num_blocks()
    );
    Ok(())
}

/// Read a saved game. `Ok(None)` when the store holds no save.
pub fn load_game<S: ByteStore>(store: &S) -> Result<Option<SavedGame>, CodecError> {
    if store.read_byte(HAS_SAVE_ADDR)? == 0 {
        return Ok(None);
    }

    let score = read_non_negative(store, SCORE_ADDR, "score")?;
    let width = read_non_negative(store, WIDTH_ADDR, "width")? as usize;
    let height = read_non_negative(store, HEIGHT_ADDR, "height")? as usize;
    if width == 0 || height == 0 {
        return Err(CodecError::Corrupt(format!(
            "grid dimensions {width}x{height}"
        )));
    }

    let required = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CELL_BYTES))
        .and_then(|n| n.checked_add(CELLS_ADDR + 8));
    match required {
        Some(required) if required <= store.capacity() => {}
        _ => {
            return Err(CodecError::Corrupt(format!(
                "grid {width}x{height} exceeds store capacity {}",
                store.capacity()
            )))
        }
    }

    let tail = num_blocks_addr(width, height);
    let num_blocks = read_non_negative(store, tail, "block count")? as usize;
    let kinds = store.read_i32(tail + 4)?;
    let block_kinds = match u8::try_from(kinds) {
        Ok(k) if (1..=MAX_BLOCK_KINDS).contains(&k) => k,
        _ => return Err(CodecError::Corrupt(format!("palette size {kinds}"))),
    };

    let mut cells: Vec<Cell> = Vec::with_capacity(width * height);
    for i in 0..width * height {
        let value = store.read_i32(CELLS_ADDR + i * CELL_BYTES)?;
        let cell = match u8::try_from(value) {
            Ok(EMPTY_CELL_SENTINEL) => None,
            Ok(kind) if kind < block_kinds => Some(Block::new(kind)),
            _ => {
                return Err(CodecError::Corrupt(format!(
                    "cell {i} holds kind {value} with palette size {block_kinds}"
                )))
            }
        };
        cells.push(cell);
    }

    let board = Board::from_columns(width, height, cells)
        .ok_or_else(|| CodecError::Corrupt("cell count mismatch".to_string()))?;
    if board.count_blocks() != num_blocks {
        return Err(CodecError::Corrupt(format!(
            "block count {num_blocks} disagrees with {} stored blocks",
            board.count_blocks()
        )));
    }

    Ok(Some(SavedGame {
        board,
        num_blocks,
        block_kinds,
        score,
        best_score: read_best_score(store)?,
    }))
}

fn read_non_negative<S: ByteStore>(store: &S, addr: usize, what: &str) -> Result<u32, CodecError> {
    let value = store.read_i32(addr)?;
    u32::try_from(value).map_err(|_| CodecError::Corrupt(format!("negative {what} {value}")))
}

fn read_best_score<S: ByteStore>(store: &S) -> Result<Option<u32>, CodecError> {
    if store.read_byte(HAS_BEST_ADDR)? == 0 {
        return Ok(None);
    }
    read_non_negative(store, BEST_SCORE_ADDR, "best score").map(Some)
}

/// Record a new best score and commit
pub fn save_best_score<S: ByteStore>(store: &mut S, best_score: u32) -> Result<(), CodecError> {
    let value = to_i32(best_score, "best score")?;
    store.write_byte(HAS_BEST_ADDR, 1)?;
    store.write_i32(BEST_SCORE_ADDR, value)?;
    store.commit()?;
    log::info!("new best score {}", best_score);
    Ok(())
}

/// Best score on record, 0 if none was ever saved
pub fn load_best_score<S: ByteStore>(store: &S) -> Result<u32, CodecError> {
    Ok(read_best_score(store)?.unwrap_or(0))
}
