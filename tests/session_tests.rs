//! Session scenarios - scoring, game over and sink delivery

use tui_blocks::core::{LatestValues, Session, SessionConfig, SessionEvent, StepOutcome, TickSource};
use tui_blocks::types::{Command, ShapeId};

const W: isize = 10;

fn started(seed: u32) -> Session {
    let mut s = Session::manual(SessionConfig {
        seed,
        ..SessionConfig::default()
    });
    s.start();
    s
}

/// A started session whose first piece has the given shape.
fn started_with(shape: ShapeId) -> Session {
    (1..500)
        .map(started)
        .find(|s| s.controller().active().map(|p| p.shape) == Some(shape))
        .expect("some seed spawns every shape first")
}

fn active_cells(s: &Session) -> [isize; 4] {
    s.controller().active_cells(s.playfield()).unwrap()
}

fn occupy(s: &mut Session, x: isize, y: isize) {
    assert!(s.playfield_mut().set_occupied(y * W + x, true));
}

fn tick_until_locked(s: &mut Session) -> StepOutcome {
    for _ in 0..40 {
        match s.on_tick() {
            StepOutcome::Moved => {}
            other => return other,
        }
    }
    panic!("piece never landed");
}

#[test]
fn test_gap_fill_scores_one_row() {
    let mut s = started(1);
    let cells = active_cells(&s);
    let bottom = cells.iter().map(|i| i / W).max().unwrap();
    let gaps: Vec<isize> = cells
        .iter()
        .filter(|&&i| i / W == bottom)
        .map(|i| i % W)
        .collect();

    for x in 0..W {
        if !gaps.contains(&x) {
            occupy(&mut s, x, 19);
        }
    }
    occupy(&mut s, 0, 17);
    s.take_events();

    assert_eq!(tick_until_locked(&mut s), StepOutcome::Locked { rows: 1 });
    assert_eq!(s.score(), 10);
    assert_eq!(s.rows_cleared(), 1);
    // The marker two rows up moved down by one.
    assert_eq!(s.playfield().is_occupied(18 * W), Ok(true));
    assert_eq!(s.playfield().is_occupied(17 * W), Ok(false));
    assert_eq!(
        s.take_events().as_slice(),
        &[SessionEvent::RowsCleared(1), SessionEvent::ScoreChanged(10)]
    );
}

#[test]
fn test_two_rows_score_twenty() {
    let mut s = started_with(ShapeId::I);
    // The vertical bar sits in column 5.
    for y in [18, 19] {
        for x in (0..W).filter(|&x| x != 5) {
            occupy(&mut s, x, y);
        }
    }

    assert_eq!(tick_until_locked(&mut s), StepOutcome::Locked { rows: 2 });
    assert_eq!(s.score(), 20);
    assert_eq!(s.playfield().height(), 20);
    assert_eq!(s.playfield().len(), 210);
    // Two bar cells survive at the bottom of column 5.
    assert_eq!(s.playfield().occupied_count(), 2);
    assert_eq!(s.playfield().is_occupied(18 * W + 5), Ok(true));
    assert_eq!(s.playfield().is_occupied(19 * W + 5), Ok(true));
}

#[test]
fn test_spawn_blocked_ends_game_and_stops_ticker_once() {
    let mut s = started(7);
    // Fill the spawn area (and the cells under the falling piece).
    for y in 0..5 {
        for x in 3..9 {
            occupy(&mut s, x, y);
        }
    }
    s.take_events();

    assert_eq!(s.on_tick(), StepOutcome::GameOver);
    assert!(s.is_over());
    assert!(s.controller().active().is_none());
    assert!(!s.ticker().is_running());
    assert_eq!(s.ticker().stops(), 1);
    assert_eq!(
        s.take_events().as_slice(),
        &[SessionEvent::GameOverChanged(true)]
    );

    // Further ticks and stops do not stop the ticker again.
    assert_eq!(s.on_tick(), StepOutcome::Ignored);
    s.stop();
    assert_eq!(s.ticker().stops(), 1);
    assert!(s.take_events().is_empty());
}

#[test]
fn test_commands_ignored_after_game_over() {
    let mut s = started(3);
    for y in 0..5 {
        for x in 3..9 {
            occupy(&mut s, x, y);
        }
    }
    assert_eq!(s.on_tick(), StepOutcome::GameOver);
    let frozen = s.snapshot();

    for command in [Command::Left, Command::Right, Command::Down, Command::Rotate] {
        assert_eq!(s.on_command(command), StepOutcome::Ignored);
    }
    assert_eq!(s.on_input("left"), StepOutcome::Ignored);
    assert_eq!(s.snapshot(), frozen);
}

#[test]
fn test_restart_after_game_over() {
    let mut s = started(3);
    for y in 0..5 {
        for x in 3..9 {
            occupy(&mut s, x, y);
        }
    }
    assert_eq!(s.on_tick(), StepOutcome::GameOver);
    assert!(!s.snapshot().playable());

    s.start();
    assert!(s.snapshot().playable());
    assert!(!s.is_over());
    assert!(s.ticker().is_running());
    assert_eq!(s.ticker().starts(), 2);
    assert_eq!(s.playfield().occupied_count(), 0);
    assert!(s.controller().active().is_some());
}

#[test]
fn test_left_edge_command_is_rejected() {
    let mut s = started(11);
    while s.on_command(Command::Left) == StepOutcome::Moved {}
    let anchor = s.controller().active().unwrap().anchor;

    assert_eq!(s.on_command(Command::Left), StepOutcome::Rejected);
    assert_eq!(s.controller().active().unwrap().anchor, anchor);
    assert!(active_cells(&s).iter().any(|i| i % W == 0));
}

#[test]
fn test_sink_receives_score_and_game_over() {
    let mut s = started_with(ShapeId::I);
    for x in (0..W).filter(|&x| x != 5) {
        occupy(&mut s, x, 19);
    }
    tick_until_locked(&mut s);

    let mut sink = LatestValues::default();
    s.drain_events_into(&mut sink);
    assert_eq!(sink.score, 10);
    assert_eq!(sink.rows_cleared, 1);
    assert!(!sink.game_over);
    let pushes = sink.pushes;
    assert!(pushes > 0);

    for y in 0..5 {
        for x in 3..9 {
            s.playfield_mut().set_occupied(y * W + x, true);
        }
    }
    while s.on_tick() != StepOutcome::GameOver {}
    s.drain_events_into(&mut sink);
    assert!(sink.game_over);
    assert!(sink.pushes > pushes);
    assert_eq!(sink.score, 10);
}

#[test]
fn test_same_seed_same_game() {
    let mut a = started(42);
    let mut b = started(42);
    for step in 0..200 {
        let command = match step % 4 {
            0 => Command::Left,
            1 => Command::Rotate,
            2 => Command::Right,
            _ => Command::Down,
        };
        assert_eq!(a.on_command(command), b.on_command(command));
        assert_eq!(a.on_tick(), b.on_tick());
    }
    assert_eq!(a.snapshot(), b.snapshot());
}
