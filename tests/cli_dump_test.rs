use std::path::PathBuf;

use tilt_blocks::cli::{dump_file, dump_store};
use tilt_blocks::core::{
    save_best_score, Board, ByteStore, FileStore, GameConfig, GameState, MemoryStore, Session,
};
use tilt_blocks::types::MEM_SIZE;

fn unique_temp_path(tag: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    std::env::temp_dir().join(format!("tilt_blocks_{tag}_{nanos}.sav"))
}

#[test]
fn dump_of_empty_store_has_no_game() {
    let report = dump_store(&MemoryStore::default()).unwrap();
    assert_eq!(report.best_score, 0);
    assert!(report.game.is_none());
}

#[test]
fn dump_reports_saved_game() {
    let mut session = Session::new(GameConfig::default(), MemoryStore::default(), 4).unwrap();
    session.set_game(GameState::from_board(
        Board::from_rows(&["012", "002"]),
        3,
        0,
    ));
    session.apply(tilt_blocks::types::GameAction::Activate).unwrap();
    session.save().unwrap();

    let mut store = session.store().clone();
    save_best_score(&mut store, 30).unwrap();

    let report = dump_store(&store).unwrap();
    assert_eq!(report.best_score, 30);
    let game = report.game.unwrap();
    assert_eq!((game.width, game.height), (3, 2));
    assert_eq!(game.score, 3);
    assert_eq!(game.best_score, 30);
    assert_eq!(game.num_blocks, 3);
}

#[test]
fn dump_file_prints_json() {
    let path = unique_temp_path("dump");
    let mut store = FileStore::open(&path, MEM_SIZE).unwrap();
    save_best_score(&mut store, 8).unwrap();
    assert_eq!(store.capacity(), MEM_SIZE);

    let json = dump_file(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["best_score"], 8);
    assert!(value["game"].is_null());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn dump_of_missing_file_fails() {
    let path = unique_temp_path("missing");
    assert!(dump_file(&path).is_err());
}
