//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`] values for the
//! session, plus the host-level restart and quit actions. Nothing here touches
//! game state.

pub mod map;

pub use tui_blocks_types as types;

pub use map::{handle_key_event, should_quit, InputAction};
