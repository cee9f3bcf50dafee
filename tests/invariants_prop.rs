//! Property tests for grid and session invariants.
//!
//! Generated seeds, board sizes and input sequences drive sessions; after
//! every step the boundary row, grid length and active-piece bookkeeping must
//! hold regardless of what the inputs did.

use proptest::prelude::*;
use tui_blocks::core::{Playfield, Session, SessionConfig, StepOutcome, TickSource};
use tui_blocks::types::{Command, RotationMode};

fn command_strategy() -> impl Strategy<Value = Option<Command>> {
    prop_oneof![
        Just(None),
        Just(Some(Command::Left)),
        Just(Some(Command::Right)),
        Just(Some(Command::Down)),
        Just(Some(Command::Rotate)),
    ]
}

fn assert_grid_invariants(s: &Session) {
    let field = s.playfield();
    let (w, h) = (field.width() as usize, field.height() as usize);

    assert_eq!(field.len(), w * (h + 1));
    assert!(field.boundary_row().iter().all(|c| c.occupied));
    assert!(!field.is_row_full(h));
    for y in 0..h {
        assert!(!field.is_row_full(y), "row {} left full after a step", y);
    }

    let active_flags = field.playable_cells().iter().filter(|c| c.active).count();
    match s.controller().active_cells(field) {
        Some(cells) => {
            assert_eq!(active_flags, 4);
            for i in cells {
                let cell = field.cell(i).unwrap();
                assert!(cell.active);
                assert!(!cell.occupied);
            }
        }
        None => assert_eq!(active_flags, 0),
    }
}

proptest! {
    #[test]
    fn generated_sessions_keep_grid_invariants(
        seed in any::<u32>(),
        width in 4u16..14,
        height in 4u16..24,
        geometric in any::<bool>(),
        inputs in prop::collection::vec(command_strategy(), 1..300),
    ) {
        let rotation = if geometric { RotationMode::Geometric } else { RotationMode::Fixed };
        let mut s = Session::manual(SessionConfig { width, height, seed, rotation });
        s.start();

        let mut score = 0;
        for input in inputs {
            let outcome = match input {
                Some(command) => s.on_command(command),
                None => s.on_tick(),
            };
            assert_grid_invariants(&s);

            prop_assert!(s.score() >= score);
            prop_assert_eq!(s.score() % 10, 0);
            score = s.score();

            if s.is_over() {
                prop_assert!(!s.ticker().is_running());
                prop_assert_eq!(s.ticker().stops(), 1);
                prop_assert!(matches!(outcome, StepOutcome::GameOver | StepOutcome::Ignored));
            }
        }
    }

    #[test]
    fn clear_full_rows_is_idempotent(
        occupied in prop::collection::vec(any::<bool>(), 200),
    ) {
        let mut field = Playfield::standard();
        for (i, on) in occupied.iter().enumerate() {
            field.set_occupied(i as isize, *on);
        }

        let first = field.clear_full_rows();
        let after_first = field.clone();
        prop_assert_eq!(field.clear_full_rows(), 0);
        prop_assert_eq!(&field, &after_first);
        prop_assert!(first <= 20);
        prop_assert_eq!(field.len(), 210);
        prop_assert!(field.boundary_row().iter().all(|c| c.occupied));
    }

    #[test]
    fn lock_never_loses_cells_without_clears(
        anchor in 0isize..150,
        occupied in prop::collection::vec(0isize..200, 0..40),
    ) {
        let mut field = Playfield::standard();
        for i in occupied {
            // Keep every row short of full.
            if i % 10 != 9 {
                field.set_occupied(i, true);
            }
        }
        let piece = [anchor, anchor + 1, anchor + 10, anchor + 11];
        prop_assume!(piece.iter().all(|&i| i % 10 != 9));
        prop_assume!(!field.is_blocked_at(&piece));

        let before = field.occupied_count();
        prop_assert_eq!(field.lock(&piece), 0);
        prop_assert_eq!(field.occupied_count(), before + 4);
    }
}
