//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the falling-block game. It performs **no
//! I/O**: no terminal, no threads, no files.
//!
//! - **Deterministic**: the same seed produces the same shape sequence
//! - **Driver-agnostic**: gravity is an explicit [`Session::on_tick`] call, so a
//!   real timer, a test harness or a replay log can drive it
//! - **Single-owner**: one [`Session`] owns its playfield, controller and RNG;
//!   there is no global state
//!
//! # Module Structure
//!
//! - [`playfield`]: grid with boundary row, collision queries, row clearing
//! - [`catalog`]: the five shapes and their offsets, computed rotation
//! - [`rng`]: seedable LCG used for uniform shape choice
//! - [`controller`]: active piece state machine (spawn, move, rotate, lock)
//! - [`session`]: score, game over, tick and command entry points
//! - [`tick`]: tick source trait plus manual and wall-clock implementations
//! - [`sink`]: session events and push-style display sinks
//! - [`snapshot`]: polled view for render sinks
//!
//! # Example
//!
//! ```
//! use tui_blocks_core::{Session, SessionConfig, StepOutcome};
//! use tui_blocks_core::types::Command;
//!
//! let mut session = Session::manual(SessionConfig::default());
//! session.start();
//!
//! assert_eq!(session.on_tick(), StepOutcome::Moved);
//! session.on_command(Command::Left);
//! session.on_command(Command::Rotate);
//!
//! // Keep dropping until the piece locks.
//! loop {
//!     match session.on_command(Command::Down) {
//!         StepOutcome::Moved => continue,
//!         outcome => {
//!             assert_eq!(outcome, StepOutcome::Locked { rows: 0 });
//!             break;
//!         }
//!     }
//! }
//! assert_eq!(session.playfield().occupied_count(), 4);
//! ```

pub mod catalog;
pub mod controller;
pub mod playfield;
pub mod rng;
pub mod session;
pub mod sink;
pub mod snapshot;
pub mod tick;

pub use tui_blocks_types as types;

// Re-export commonly used types for convenience
pub use catalog::{offsets, random_shape};
pub use controller::{ActivePiece, MoveDown, PieceController, SpawnBlocked};
pub use playfield::{OutOfBounds, PieceCells, Playfield};
pub use rng::SimpleRng;
pub use session::{Session, SessionConfig, StepOutcome};
pub use sink::{LatestValues, SessionEvent, SessionSink};
pub use snapshot::{ActiveSnapshot, SessionSnapshot};
pub use tick::{IntervalTicker, ManualTicker, TickSource};
