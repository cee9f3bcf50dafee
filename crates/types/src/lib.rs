//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the core logic, the terminal front end and the replay tooling alike.
//!
//! # Playfield Dimensions
//!
//! - **Width**: 10 columns by default (indexed 0-9)
//! - **Height**: 20 playable rows by default, plus one boundary row below
//! - **Spawn anchor**: `width / 2 - 1` (linear index 4 on a 10-wide field)
//!
//! # Timing
//!
//! Gravity fires on a fixed tick (`TICK_MS`, 1000ms). There is no level or
//! speed progression.
//!
//! # Examples
//!
//! ```
//! use tui_blocks_types::{Command, Rotation, ShapeId, DEFAULT_HEIGHT, DEFAULT_WIDTH};
//!
//! // Parse a shape (case-insensitive)
//! assert_eq!(ShapeId::from_str("t"), Some(ShapeId::T));
//!
//! // Rotation cycles through four states
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//!
//! // Unknown command tokens are rejected
//! assert_eq!(Command::from_str("left"), Some(Command::Left));
//! assert_eq!(Command::from_str("jump"), None);
//!
//! assert_eq!(DEFAULT_WIDTH, 10);
//! assert_eq!(DEFAULT_HEIGHT, 20);
//! ```

/// Default playfield width in cells (10 columns)
pub const DEFAULT_WIDTH: u16 = 10;

/// Default playfield height in playable rows (20 rows)
pub const DEFAULT_HEIGHT: u16 = 20;

/// Smallest width/height the catalog shapes fit into (the I piece spans 4 rows).
pub const MIN_DIMENSION: u16 = 4;

/// Largest accepted width/height.
pub const MAX_DIMENSION: u16 = 200;

/// Gravity interval in milliseconds (one row per second)
pub const TICK_MS: u32 = 1000;

/// Points awarded for each cleared row
pub const SCORE_PER_ROW: u32 = 10;

/// The five shape identities of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeId {
    L,
    Z,
    T,
    Square,
    I,
}

impl ShapeId {
    /// All shapes in catalog order.
    pub const ALL: [ShapeId; 5] = [ShapeId::L, ShapeId::Z, ShapeId::T, ShapeId::Square, ShapeId::I];

    /// Parse shape from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blocks_types::ShapeId;
    ///
    /// assert_eq!(ShapeId::from_str("L"), Some(ShapeId::L));
    /// assert_eq!(ShapeId::from_str("square"), Some(ShapeId::Square));
    /// assert_eq!(ShapeId::from_str("o"), Some(ShapeId::Square));
    /// assert_eq!(ShapeId::from_str("s"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "l" => Some(ShapeId::L),
            "z" => Some(ShapeId::Z),
            "t" => Some(ShapeId::T),
            "square" | "o" => Some(ShapeId::Square),
            "i" => Some(ShapeId::I),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeId::L => "l",
            ShapeId::Z => "z",
            ShapeId::T => "t",
            ShapeId::Square => "square",
            ShapeId::I => "i",
        }
    }

    /// Position in [`ShapeId::ALL`].
    pub fn index(&self) -> usize {
        match self {
            ShapeId::L => 0,
            ShapeId::Z => 1,
            ShapeId::T => 2,
            ShapeId::Square => 3,
            ShapeId::I => 4,
        }
    }
}

/// Rotation state of the active piece
///
/// - **North**: spawn orientation (state 0)
/// - **East**: one clockwise step (state 1)
/// - **South**: two steps (state 2)
/// - **West**: three steps (state 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blocks_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::East.rotate_cw(), Rotation::South);
    /// assert_eq!(Rotation::South.rotate_cw(), Rotation::West);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotation counter value in `0..4`.
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// How `Rotate` changes the occupied cells of the active piece.
///
/// - **Fixed**: the rotation counter advances but the canonical offsets are
///   reused, so the piece keeps its shape (observed reference behavior).
/// - **Geometric**: offsets are turned 90° clockwise inside the shape's
///   bounding box for every step of the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotationMode {
    #[default]
    Fixed,
    Geometric,
}

impl RotationMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fixed" => Some(RotationMode::Fixed),
            "geometric" => Some(RotationMode::Geometric),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RotationMode::Fixed => "fixed",
            RotationMode::Geometric => "geometric",
        }
    }
}

/// Horizontal direction of a move attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Linear index delta (-1 or +1).
    pub fn delta(&self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Player commands accepted by the session
///
/// These are produced by human input and by replay logs alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one cell left
    Left,
    /// Move piece one cell right
    Right,
    /// Force one gravity step (same path as a tick, including lock/spawn)
    Down,
    /// Advance the rotation state
    Rotate,
}

impl Command {
    /// Parse command from string (for input sources and replay logs)
    ///
    /// Unknown tokens yield `None` and are ignored by callers.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blocks_types::Command;
    ///
    /// assert_eq!(Command::from_str("MoveLeft"), Some(Command::Left));
    /// assert_eq!(Command::from_str("softDrop"), Some(Command::Down));
    /// assert_eq!(Command::from_str("rotate"), Some(Command::Rotate));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" | "moveleft" => Some(Command::Left),
            "right" | "moveright" => Some(Command::Right),
            "down" | "softdrop" => Some(Command::Down),
            "rotate" | "up" => Some(Command::Rotate),
            _ => None,
        }
    }

    /// Convert to lowercase string (replay log format)
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Left => "left",
            Command::Right => "right",
            Command::Down => "down",
            Command::Rotate => "rotate",
        }
    }
}

/// A single playfield cell
///
/// `occupied` drives every collision query. `active` marks cells of the
/// falling piece and only exists for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub occupied: bool,
    pub active: bool,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        occupied: false,
        active: false,
    };

    pub const SOLID: Cell = Cell {
        occupied: true,
        active: false,
    };
}
