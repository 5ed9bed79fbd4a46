//! Tests for board positions.

use roomtoe_tictactoe::{Board, Position, Symbol};

#[test]
fn test_index_round_trip_covers_board() {
    for index in 0..9 {
        let pos = Position::from_index(index).unwrap();
        assert_eq!(pos.to_index(), index);
    }
    assert_eq!(Position::from_index(4), Some(Position::Center));
    assert_eq!(Position::from_index(9), None);
}

#[test]
fn test_display_is_kebab_case() {
    assert_eq!(Position::TopLeft.to_string(), "top-left");
    assert_eq!(Position::Center.to_string(), "center");
}

#[test]
fn test_valid_moves_skip_occupied_cells() {
    assert_eq!(Position::valid_moves(&Board::new()).len(), 9);

    let mut board = Board::new();
    board.occupy(Position::TopLeft, Symbol::X).unwrap();
    board.occupy(Position::Center, Symbol::O).unwrap();

    let valid = Position::valid_moves(&board);
    assert_eq!(valid.len(), 7);
    assert_eq!(valid.first(), Some(&Position::TopCenter));
    assert!(!valid.contains(&Position::Center));
}
