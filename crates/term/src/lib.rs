//! Terminal front end for the block-dropping session.
//!
//! Rendering goes through a plain framebuffer rather than a widget toolkit:
//! `GameView` maps a `SessionSnapshot` into cells and `TerminalRenderer`
//! flushes the changed cells with crossterm.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_blocks_core as core;
pub use tui_blocks_types as types;

pub use fb::{FrameBuffer, Glyph, Rect, Rgb, Style};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
