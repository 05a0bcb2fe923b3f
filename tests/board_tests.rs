//! Board tests - flood fill, compaction and pair detection

use tilt_blocks::core::{AffectedRegion, Board, SimpleRng};
use tilt_blocks::types::Block;

fn sorted(mut group: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
    group.sort_unstable();
    group
}

#[test]
fn test_board_new_empty() {
    let board = Board::new(16, 6);
    assert_eq!(board.width(), 16);
    assert_eq!(board.height(), 6);
    assert_eq!(board.count_blocks(), 0);
    for col in 0..16 {
        for row in 0..6 {
            assert_eq!(board.get(col, row), Some(None));
        }
    }
}

#[test]
fn test_board_get_set_out_of_bounds() {
    let mut board = Board::new(3, 2);
    assert_eq!(board.get(3, 0), None);
    assert_eq!(board.get(0, 2), None);
    assert!(!board.set(3, 0, Some(Block::new(0))));
    assert!(board.set(2, 1, Some(Block::new(4))));
    assert_eq!(board.block(2, 1), Some(Block::new(4)));
    assert!(board.is_occupied(2, 1));
}

#[test]
fn test_filled_board_uses_palette() {
    let mut rng = SimpleRng::new(99);
    let board = Board::filled(16, 6, 3, &mut rng);
    assert_eq!(board.count_blocks(), 96);
    assert!(board.cells().iter().all(|c| c.is_some_and(|b| b.kind() < 3)));
}

#[test]
fn test_from_columns_checks_length() {
    assert!(Board::from_columns(2, 2, vec![None; 3]).is_none());
    let board = Board::from_columns(2, 1, vec![Some(Block::new(1)), None]).unwrap();
    assert_eq!(board.to_string(), "1.");
}

#[test]
fn test_connected_group_stays_on_kind() {
    let board = Board::from_rows(&["0010", "1000", "0111"]);
    let group = sorted(board.connected_group(0, 0));
    assert_eq!(group, vec![(0, 0), (1, 0), (1, 1), (2, 1), (3, 0), (3, 1)]);

    // the lone 0 in the bottom-left corner is cut off by 1s
    assert_eq!(board.connected_group(0, 2), vec![(0, 2)]);
}

#[test]
fn test_connected_group_starts_with_cursor_cell() {
    let board = Board::from_rows(&["22", "22"]);
    let group = board.connected_group(1, 1);
    assert_eq!(group[0], (1, 1));
    assert_eq!(group.len(), 4);
}

#[test]
fn test_connected_group_of_empty_or_outside_is_empty() {
    let board = Board::from_rows(&["0.", "00"]);
    assert!(board.connected_group(1, 0).is_empty());
    assert!(board.connected_group(5, 5).is_empty());
}

#[test]
fn test_remove_reports_region() {
    let mut board = Board::from_rows(&["011", "001"]);
    let region = board.remove(&[(2, 0), (1, 0), (2, 1)]).unwrap();
    assert_eq!(
        region,
        AffectedRegion {
            most_left_col: 1,
            most_down_row: 1
        }
    );
    assert_eq!(board.count_blocks(), 3);
    assert!(board.remove(&[]).is_none());
}

#[test]
fn test_compact_settles_and_packs() {
    // removing the 1s empties column 1; the 2s left in columns 2 and 3 fall
    // and shift one column left
    let mut board = Board::from_rows(&["0121", "0111", "0112"]);
    let group = board.connected_group(1, 1);
    assert_eq!(group.len(), 7);
    let region = board.remove(&group).unwrap();
    board.compact(region);
    assert_eq!(board.to_string(), "0...\n0...\n022.");
}

#[test]
fn test_compact_skips_pack_when_bottom_untouched() {
    // the removal stays in row 0, so no column can empty
    let mut board = Board::from_rows(&["11", "02"]);
    let group = board.connected_group(0, 0);
    let region = board.remove(&group).unwrap();
    board.compact(region);
    assert_eq!(board.to_string(), "..\n02");
}

#[test]
fn test_row_fall_only_inside_region() {
    let mut board = Board::from_rows(&["0.", "1.", ".2", "33"]);
    board.settle_columns(AffectedRegion {
        most_left_col: 1,
        most_down_row: 2,
    });
    // column 0 is left of the region and keeps its gap
    assert_eq!(board.to_string(), "0.\n1.\n.2\n33");
}

#[test]
fn test_has_matching_pair() {
    assert!(Board::from_rows(&["01", "21"]).has_matching_pair());
    assert!(Board::from_rows(&["00"]).has_matching_pair());
    assert!(!Board::from_rows(&["01", "10"]).has_matching_pair());
    assert!(!Board::from_rows(&["0.0"]).has_matching_pair());
    assert!(!Board::new(3, 3).has_matching_pair());
}
