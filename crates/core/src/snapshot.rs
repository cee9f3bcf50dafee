//! Read-only session views polled by render sinks.

use crate::controller::ActivePiece;
use crate::playfield::PieceCells;
use crate::types::{Cell, Rotation, ShapeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub shape: ShapeId,
    pub rotation: Rotation,
    pub anchor: isize,
    pub cells: PieceCells,
}

impl ActiveSnapshot {
    pub fn new(piece: ActivePiece, cells: PieceCells) -> Self {
        Self {
            shape: piece.shape,
            rotation: piece.rotation,
            anchor: piece.anchor,
            cells,
        }
    }
}

/// Polled view of a session for render sinks.
///
/// `cells` holds the playable rows only (`width * height`), row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionSnapshot {
    pub width: u16,
    pub height: u16,
    pub cells: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub next_shape: ShapeId,
    pub score: u32,
    pub rows_cleared: u32,
    pub started: bool,
    pub game_over: bool,
    pub seed: u32,
}

impl SessionSnapshot {
    pub fn cell(&self, x: u16, y: u16) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn playable(&self) -> bool {
        self.started && !self.game_over
    }

    /// Text rendering of the playable rows: `#` locked, `@` active, `.` empty.
    pub fn ascii_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width as usize)
            .map(|row| {
                row.iter()
                    .map(|c| {
                        if c.occupied {
                            '#'
                        } else if c.active {
                            '@'
                        } else {
                            '.'
                        }
                    })
                    .collect()
            })
            .collect()
    }
}
