//! Playfield tests - grid layout, locking and row clearing through the facade

use tui_blocks::core::{OutOfBounds, Playfield};
use tui_blocks::types::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

fn idx(x: usize, y: usize) -> isize {
    (y * DEFAULT_WIDTH as usize + x) as isize
}

fn fill_row_except(field: &mut Playfield, y: usize, gap: usize) {
    for x in 0..field.width() as usize {
        if x != gap {
            assert!(field.set_occupied(idx(x, y), true));
        }
    }
}

#[test]
fn test_standard_layout() {
    let field = Playfield::standard();
    assert_eq!(field.width(), DEFAULT_WIDTH);
    assert_eq!(field.height(), DEFAULT_HEIGHT);
    assert_eq!(field.len(), 10 * 21);
    assert_eq!(field.boundary_start(), 200);
    assert_eq!(field.occupied_count(), 0);
    assert!(field.boundary_row().iter().all(|c| c.occupied));
}

#[test]
fn test_out_of_bounds_probe_is_reported_and_blocks() {
    let field = Playfield::standard();
    assert_eq!(field.is_occupied(-1), Err(OutOfBounds { index: -1 }));
    assert_eq!(field.is_occupied(210), Err(OutOfBounds { index: 210 }));
    assert_eq!(field.is_occupied(205), Ok(true));
    assert!(field.is_blocked(-10));
    assert!(field.is_blocked_at(&[0, 1, 2, 210]));
    assert!(!field.is_blocked_at(&[0, 1, 2, 3]));
}

#[test]
fn test_clear_full_rows_is_idempotent_without_full_rows() {
    let mut field = Playfield::standard();
    fill_row_except(&mut field, 19, 3);
    fill_row_except(&mut field, 12, 0);
    let before = field.clone();

    assert_eq!(field.clear_full_rows(), 0);
    assert_eq!(field.clear_full_rows(), 0);
    assert_eq!(field, before);
}

#[test]
fn test_lock_adds_piece_cells_before_clearing() {
    let mut field = Playfield::standard();
    let piece = [idx(4, 18), idx(5, 18), idx(4, 19), idx(5, 19)];

    assert_eq!(field.lock(&piece), 0);
    assert_eq!(field.occupied_count(), 4);
    for i in piece {
        assert_eq!(field.is_occupied(i), Ok(true));
    }
}

#[test]
fn test_gap_fill_clears_one_row_and_shifts_above() {
    let mut field = Playfield::standard();
    fill_row_except(&mut field, 19, 9);
    field.set_occupied(idx(0, 18), true);

    // Vertical bar dropped into the gap at column 9.
    let bar = [idx(9, 16), idx(9, 17), idx(9, 18), idx(9, 19)];
    assert_eq!(field.lock(&bar), 1);

    // Row 18 moved to row 19, the bar lost its bottom cell.
    assert_eq!(field.is_occupied(idx(0, 19)), Ok(true));
    assert_eq!(field.is_occupied(idx(9, 19)), Ok(true));
    assert_eq!(field.is_occupied(idx(9, 18)), Ok(true));
    assert_eq!(field.is_occupied(idx(9, 17)), Ok(true));
    assert_eq!(field.is_occupied(idx(9, 16)), Ok(false));
    assert_eq!(field.is_occupied(idx(0, 18)), Ok(false));
    assert_eq!(field.occupied_count(), 4);
    assert!(field.row(0).unwrap().iter().all(|c| !c.occupied));
}

#[test]
fn test_two_rows_in_one_lock() {
    let mut field = Playfield::standard();
    fill_row_except(&mut field, 18, 9);
    fill_row_except(&mut field, 19, 9);

    let bar = [idx(9, 16), idx(9, 17), idx(9, 18), idx(9, 19)];
    assert_eq!(field.lock(&bar), 2);

    assert_eq!(field.len(), 210);
    assert_eq!(field.height(), DEFAULT_HEIGHT);
    assert_eq!(field.occupied_count(), 2);
    assert_eq!(field.is_occupied(idx(9, 18)), Ok(true));
    assert_eq!(field.is_occupied(idx(9, 19)), Ok(true));
    assert!(field.row(0).unwrap().iter().all(|c| !c.occupied));
    assert!(field.row(1).unwrap().iter().all(|c| !c.occupied));
    assert!(field.boundary_row().iter().all(|c| c.occupied));
}

#[test]
fn test_non_standard_width() {
    let mut field = Playfield::new(6, 5);
    assert_eq!(field.len(), 6 * 6);
    for x in 0..6 {
        field.set_occupied(4 * 6 + x, true);
    }
    assert!(field.is_row_full(4));
    assert_eq!(field.clear_full_rows(), 1);
    assert_eq!(field.occupied_count(), 0);
}
