//! Save/load tests against in-memory and file-backed stores

use std::path::PathBuf;

use proptest::prelude::*;

use tilt_blocks::core::persistence::{BEST_SCORE_ADDR, CELLS_ADDR, HAS_BEST_ADDR, SCORE_ADDR};
use tilt_blocks::core::{
    load_best_score, load_game, save_best_score, save_game, Board, ByteStore, CodecError,
    FileStore, GameConfig, GameState, MemoryStore, Session, SimpleRng,
};
use tilt_blocks::types::{GameAction, MEM_SIZE};

fn unique_temp_path(tag: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    std::env::temp_dir().join(format!("tilt_blocks_{tag}_{nanos}.sav"))
}

#[test]
fn best_score_uses_fixed_offsets() {
    let mut store = MemoryStore::default();
    save_best_score(&mut store, 0x0102).unwrap();

    assert_eq!(store.read_byte(HAS_BEST_ADDR).unwrap(), 1);
    assert_eq!(store.read_i32(BEST_SCORE_ADDR).unwrap(), 0x0102);
    assert_eq!(load_best_score(&store).unwrap(), 0x0102);
    // no game was saved
    assert_eq!(load_game(&store).unwrap(), None);
}

#[test]
fn best_score_save_leaves_game_bytes_alone() {
    let mut store = MemoryStore::default();
    let gs = GameState::from_board(Board::from_rows(&["01", "10"]), 2, 0);
    save_game(&gs, &mut store).unwrap();
    let before = store.bytes()[..SCORE_ADDR + 4].to_vec();
    let cells_before = store.bytes()[CELLS_ADDR..CELLS_ADDR + 16].to_vec();

    save_best_score(&mut store, 9).unwrap();
    assert_eq!(&store.bytes()[..SCORE_ADDR + 4], &before[..]);
    assert_eq!(&store.bytes()[CELLS_ADDR..CELLS_ADDR + 16], &cells_before[..]);
}

#[test]
fn partially_cleared_game_round_trips() {
    let mut gs = GameState::from_board(Board::from_rows(&["012", "002"]), 3, 4);
    gs.activate();
    let mut store = MemoryStore::default();
    save_game(&gs, &mut store).unwrap();

    let saved = load_game(&store).unwrap().unwrap();
    assert_eq!(saved.board, *gs.board());
    assert_eq!(saved.score, 3);
    assert_eq!(saved.num_blocks, 3);
    assert_eq!(saved.block_kinds, 3);
    assert_eq!(saved.best_score, None);

    let restored = GameState::from_saved(saved);
    assert_eq!(restored.board(), gs.board());
    assert_eq!(restored.score(), gs.score());
}

#[test]
fn grid_larger_than_region_is_rejected() {
    let config = GameConfig::new(16, 16, 3).unwrap();
    let gs = GameState::new(&config, &mut SimpleRng::new(1), 0);
    let mut store = MemoryStore::default();

    match save_game(&gs, &mut store) {
        Err(CodecError::Capacity { required, capacity }) => {
            assert_eq!(required, 26 + 4 * 256);
            assert_eq!(capacity, MEM_SIZE);
        }
        other => panic!("expected capacity error, got {:?}", other),
    }
    assert_eq!(load_game(&store).unwrap(), None);
}

#[test]
fn corrupt_save_leaves_session_untouched() {
    let mut session = Session::new(GameConfig::default(), MemoryStore::default(), 5).unwrap();
    session.save().unwrap();
    let before = session.state().clone();

    // corrupt the palette size
    let mut store = session.store().clone();
    let tail = CELLS_ADDR + 4 * 96;
    store.write_i32(tail + 4, 9).unwrap();
    let mut damaged = Session::new(GameConfig::default(), store, 5).unwrap();
    let fresh = damaged.state().clone();

    assert!(matches!(damaged.load(), Err(CodecError::Corrupt(_))));
    assert_eq!(damaged.state(), &fresh);
    assert_eq!(session.state(), &before);
}

#[test]
fn file_store_carries_game_across_sessions() {
    let path = unique_temp_path("session");

    let saved_board = {
        let store = FileStore::open(&path, MEM_SIZE).unwrap();
        let mut session = Session::new(GameConfig::default(), store, 11).unwrap();
        session.apply(GameAction::SaveRequest).unwrap();
        session.state().board().clone()
    };

    let store = FileStore::open(&path, MEM_SIZE).unwrap();
    let mut session = Session::new(GameConfig::default(), store, 12).unwrap();
    assert_ne!(session.state().board(), &saved_board);
    assert!(session.load().unwrap());
    assert_eq!(session.state().board(), &saved_board);

    let _ = std::fs::remove_file(&path);
}

proptest! {
    #[test]
    fn save_then_load_round_trips(
        width in 1usize..=16,
        height in 1usize..=6,
        kinds in 1u8..=5,
        seed in any::<u32>(),
        taps in prop::collection::vec((0usize..16, 0usize..6), 0..12),
    ) {
        let config = GameConfig::new(width, height, kinds).unwrap();
        let mut gs = GameState::new(&config, &mut SimpleRng::new(seed), 0);
        for (col, row) in taps {
            gs.set_cursor(col % width, row % height);
            gs.activate();
        }

        let mut store = MemoryStore::default();
        save_game(&gs, &mut store).unwrap();
        let saved = load_game(&store).unwrap().unwrap();

        prop_assert_eq!(&saved.board, gs.board());
        prop_assert_eq!(saved.num_blocks, gs.num_blocks());
        prop_assert_eq!(saved.block_kinds, gs.block_kinds());
        prop_assert_eq!(saved.score, gs.score());
    }
}
