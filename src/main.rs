//! Terminal block game runner (default binary).
//!
//! One poll loop: render, wait for keys until the next tick is due, dispatch
//! commands, then fire the tick. Configuration comes from `BLOCKS_*`
//! environment variables and command-line flags (see `config`).

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_blocks::config::GameConfig;
use tui_blocks::core::{IntervalTicker, LatestValues, Session, SessionSink};
use tui_blocks::input::{handle_key_event, InputAction};
use tui_blocks::replay::{Recorder, ReplayEntry, ReplayHeader};
use tui_blocks::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// Poll timeout while no tick is scheduled (before start, after game over).
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Score sink that also remembers results across restarts.
#[derive(Default)]
struct Summary {
    latest: LatestValues,
    games: u32,
    best: u32,
}

impl SessionSink for Summary {
    fn score_changed(&mut self, score: u32) {
        self.latest.score_changed(score);
        self.best = self.best.max(score);
    }

    fn game_over_changed(&mut self, over: bool) {
        self.latest.game_over_changed(over);
        if over {
            self.games += 1;
        }
    }

    fn rows_cleared(&mut self, rows: u32) {
        self.latest.rows_cleared(rows);
    }
}

fn main() -> Result<()> {
    let config = GameConfig::load()?;
    let mut recorder = match &config.record {
        Some(path) => Some(Recorder::create(path, ReplayHeader::from(config.session()))?),
        None => None,
    };

    let mut summary = Summary::default();
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, &mut summary, recorder.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();

    eprintln!(
        "[Session] seed={} games_over={} best={} last_score={} rows={}",
        config.seed, summary.games, summary.best, summary.latest.score, summary.latest.rows_cleared
    );
    if let (Some(recorder), Some(path)) = (recorder, &config.record) {
        let entries = recorder.entries();
        recorder.finish()?;
        eprintln!("[Replay] wrote {} entries to {}", entries, path.display());
    }
    result
}

fn run(
    term: &mut TerminalRenderer,
    config: &GameConfig,
    summary: &mut Summary,
    mut recorder: Option<&mut Recorder>,
) -> Result<()> {
    let mut session = Session::new(config.session(), IntervalTicker::from_millis(config.tick_ms));
    session.start();

    let view = GameView::default();
    let mut snap = session.snapshot();
    let mut fb = FrameBuffer::new(0, 0);
    let mut record = |entry: ReplayEntry| -> Result<()> {
        if let Some(r) = recorder.as_deref_mut() {
            r.record(&entry)?;
        }
        Ok(())
    };

    loop {
        session.drain_events_into(summary);

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        // Input until the next tick is due.
        let timeout = session
            .ticker()
            .time_until_due(Instant::now())
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match handle_key_event(key) {
                    Some(InputAction::Quit) => return Ok(()),
                    Some(InputAction::Restart) => {
                        session.start();
                        record(ReplayEntry::Start)?;
                    }
                    Some(InputAction::Command(command)) => {
                        session.on_command(command);
                        record(ReplayEntry::command(command))?;
                    }
                    None => {}
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if session.ticker_mut().due(Instant::now()) {
            session.on_tick();
            record(ReplayEntry::Tick)?;
        }
    }
}
