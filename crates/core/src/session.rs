//! Game session - ties the playfield and piece controller together
//!
//! The session owns score, the running/over state and the shape lookahead, and
//! exposes the two entry points hosts drive it with: [`Session::on_tick`] for
//! gravity and [`Session::on_command`] for player input. Both are synchronous
//! and must not be re-entered.
//!
//! Once the session is over, every entry point except [`Session::start`] is a
//! no-op.

use arrayvec::ArrayVec;

use crate::catalog::random_shape;
use crate::controller::{MoveDown, PieceController, SpawnBlocked};
use crate::playfield::Playfield;
use crate::rng::SimpleRng;
use crate::sink::{SessionEvent, SessionSink};
use crate::snapshot::{ActiveSnapshot, SessionSnapshot};
use crate::tick::{ManualTicker, TickSource};
use crate::types::*;

/// Pending events kept for sinks; the oldest is dropped when full.
pub const EVENT_CAPACITY: usize = 16;

/// Session parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub width: u16,
    pub height: u16,
    pub seed: u32,
    pub rotation: RotationMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: 1,
            rotation: RotationMode::Fixed,
        }
    }
}

/// What an entry point call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The session is over, not started, or the input was not a command
    Ignored,
    /// The move or rotation was blocked; nothing changed
    Rejected,
    /// The piece moved or rotated
    Moved,
    /// The piece locked, `rows` rows were cleared and the next piece spawned
    Locked { rows: u32 },
    /// The piece locked and the next one could not spawn
    GameOver,
}

/// One game: playfield, active piece, score and lifecycle
#[derive(Debug, Clone)]
pub struct Session<T: TickSource = ManualTicker> {
    config: SessionConfig,
    playfield: Playfield,
    controller: PieceController,
    rng: SimpleRng,
    ticker: T,
    next_shape: ShapeId,
    score: u32,
    rows_cleared: u32,
    started: bool,
    over: bool,
    events: ArrayVec<SessionEvent, EVENT_CAPACITY>,
}

impl Session<ManualTicker> {
    /// Session driven by hand (tests, replays).
    pub fn manual(config: SessionConfig) -> Self {
        Self::new(config, ManualTicker::new())
    }
}

impl<T: TickSource> Session<T> {
    /// Create a session; call [`Session::start`] to begin play.
    pub fn new(config: SessionConfig, ticker: T) -> Self {
        let mut rng = SimpleRng::new(config.seed);
        let next_shape = random_shape(&mut rng);

        Self {
            config,
            playfield: Playfield::new(config.width, config.height),
            controller: PieceController::new(config.rotation),
            rng,
            ticker,
            next_shape,
            score: 0,
            rows_cleared: 0,
            started: false,
            over: false,
            events: ArrayVec::new(),
        }
    }

    /// Reset the grid and score, spawn a piece and start the tick source.
    ///
    /// Also restarts a finished game. The shape sequence continues from the
    /// session's RNG rather than rewinding to the seed.
    pub fn start(&mut self) {
        if self.ticker.is_running() {
            self.ticker.stop();
        }

        self.controller.clear(&mut self.playfield);
        self.playfield.reset();
        self.score = 0;
        self.rows_cleared = 0;
        self.over = false;
        self.started = true;
        self.emit(SessionEvent::ScoreChanged(0));
        self.emit(SessionEvent::GameOverChanged(false));

        if self.spawn_next().is_err() {
            self.enter_game_over();
            return;
        }
        self.ticker.start();
    }

    /// Stop the tick source. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.ticker.stop();
    }

    /// One gravity step.
    pub fn on_tick(&mut self) -> StepOutcome {
        if !self.accepts_input() {
            return StepOutcome::Ignored;
        }
        self.step_down()
    }

    /// Dispatch a player command.
    pub fn on_command(&mut self, command: Command) -> StepOutcome {
        if !self.accepts_input() {
            return StepOutcome::Ignored;
        }

        let moved = match command {
            Command::Left => self
                .controller
                .attempt_move_horizontal(&mut self.playfield, Direction::Left),
            Command::Right => self
                .controller
                .attempt_move_horizontal(&mut self.playfield, Direction::Right),
            Command::Rotate => self.controller.attempt_rotate(&mut self.playfield),
            Command::Down => return self.step_down(),
        };

        if moved {
            StepOutcome::Moved
        } else {
            StepOutcome::Rejected
        }
    }

    /// Dispatch a textual command token; unknown tokens are ignored.
    pub fn on_input(&mut self, token: &str) -> StepOutcome {
        match Command::from_str(token) {
            Some(command) => self.on_command(command),
            None => StepOutcome::Ignored,
        }
    }

    fn accepts_input(&self) -> bool {
        self.started && !self.over
    }

    fn step_down(&mut self) -> StepOutcome {
        match self.controller.attempt_move_down(&mut self.playfield) {
            MoveDown::Moved => StepOutcome::Moved,
            MoveDown::Idle => StepOutcome::Ignored,
            MoveDown::Landed => self.lock_and_respawn(),
        }
    }

    fn lock_and_respawn(&mut self) -> StepOutcome {
        let rows = self.controller.lock(&mut self.playfield).unwrap_or(0) as u32;
        if rows > 0 {
            self.rows_cleared += rows;
            self.score += rows * SCORE_PER_ROW;
            self.emit(SessionEvent::RowsCleared(rows));
            self.emit(SessionEvent::ScoreChanged(self.score));
        }

        match self.spawn_next() {
            Ok(()) => StepOutcome::Locked { rows },
            Err(_) => {
                self.enter_game_over();
                StepOutcome::GameOver
            }
        }
    }

    fn spawn_next(&mut self) -> Result<(), SpawnBlocked> {
        let shape = self.next_shape;
        self.next_shape = random_shape(&mut self.rng);
        self.controller.spawn(&mut self.playfield, shape).map(|_| ())
    }

    fn enter_game_over(&mut self) {
        if self.over {
            return;
        }
        self.over = true;
        self.ticker.stop();
        self.emit(SessionEvent::GameOverChanged(true));
    }

    fn emit(&mut self, event: SessionEvent) {
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Take the pending events, oldest first.
    pub fn take_events(&mut self) -> ArrayVec<SessionEvent, EVENT_CAPACITY> {
        std::mem::take(&mut self.events)
    }

    /// Push pending events to a sink.
    pub fn drain_events_into(&mut self, sink: &mut impl SessionSink) {
        for event in self.take_events() {
            sink.dispatch(event);
        }
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Total rows cleared since the last start.
    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn next_shape(&self) -> ShapeId {
        self.next_shape
    }

    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    /// Direct grid access for scenario setup and tooling.
    ///
    /// Changing cells under the active piece is allowed; the next gravity
    /// step treats them like any other obstacle.
    pub fn playfield_mut(&mut self) -> &mut Playfield {
        &mut self.playfield
    }

    pub fn controller(&self) -> &PieceController {
        &self.controller
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.width = self.playfield.width();
        out.height = self.playfield.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.playfield.playable_cells());
        out.active = self.controller.active().and_then(|piece| {
            self.controller
                .active_cells(&self.playfield)
                .map(|cells| ActiveSnapshot::new(piece, cells))
        });
        out.next_shape = self.next_shape;
        out.score = self.score;
        out.rows_cleared = self.rows_cleared;
        out.started = self.started;
        out.game_over = self.over;
        out.seed = self.rng.seed();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot {
            width: 0,
            height: 0,
            cells: Vec::new(),
            active: None,
            next_shape: self.next_shape,
            score: 0,
            rows_cleared: 0,
            started: false,
            game_over: false,
            seed: 0,
        };
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Session<ManualTicker> {
    fn default() -> Self {
        Self::manual(SessionConfig::default())
    }
}
