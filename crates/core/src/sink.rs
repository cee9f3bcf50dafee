//! Session events and the push-style display sinks that consume them.

/// Something a display sink may want to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A lock completed this many rows
    RowsCleared(u32),
    ScoreChanged(u32),
    GameOverChanged(bool),
}

/// Score and game-over display sinks.
pub trait SessionSink {
    fn score_changed(&mut self, score: u32);

    fn game_over_changed(&mut self, over: bool);

    fn rows_cleared(&mut self, _rows: u32) {}

    fn dispatch(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::RowsCleared(rows) => self.rows_cleared(rows),
            SessionEvent::ScoreChanged(score) => self.score_changed(score),
            SessionEvent::GameOverChanged(over) => self.game_over_changed(over),
        }
    }
}

/// Sink that keeps the last pushed values (tests, headless hosts).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatestValues {
    pub score: u32,
    pub game_over: bool,
    pub rows_cleared: u32,
    pub pushes: u32,
}

impl SessionSink for LatestValues {
    fn score_changed(&mut self, score: u32) {
        self.score = score;
        self.pushes += 1;
    }

    fn game_over_changed(&mut self, over: bool) {
        self.game_over = over;
        self.pushes += 1;
    }

    fn rows_cleared(&mut self, rows: u32) {
        self.rows_cleared += rows;
    }
}
