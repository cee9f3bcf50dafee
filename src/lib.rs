//! TUI block-dropping game (workspace facade crate).
//!
//! The game logic lives in dedicated crates under `crates/`; this package
//! re-exports them as `tui_blocks::{core,input,term,types}` and adds the
//! host-level pieces shared by the binaries: configuration and replay logs.

pub use tui_blocks_core as core;
pub use tui_blocks_input as input;
pub use tui_blocks_term as term;
pub use tui_blocks_types as types;

pub mod config;
pub mod replay;
