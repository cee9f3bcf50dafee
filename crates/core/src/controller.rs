//! Piece controller - the active piece state machine
//!
//! Holds at most one [`ActivePiece`] and moves it through spawn → move/rotate →
//! lock. Every attempt is validated against the [`Playfield`] and is
//! all-or-nothing: either the full 4-cell candidate is free and gets committed,
//! or the piece is left exactly as it was.
//!
//! The controller also keeps the playfield's render-only `active` flags in step
//! with the piece.

use std::fmt;

use crate::catalog::{self, ShapeCells};
use crate::playfield::{PieceCells, Playfield};
use crate::types::{Direction, Rotation, RotationMode, ShapeId};

/// Spawn anchor for a playfield width (`width / 2 - 1`).
pub fn spawn_anchor(width: u16) -> isize {
    width as isize / 2 - 1
}

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub shape: ShapeId,
    /// Linear index the shape offsets are added to
    pub anchor: isize,
    pub rotation: Rotation,
}

impl ActivePiece {
    /// Create a piece at the spawn anchor, rotation state 0
    pub fn new(shape: ShapeId, width: u16) -> Self {
        Self {
            shape,
            anchor: spawn_anchor(width),
            rotation: Rotation::North,
        }
    }

    /// Cell layout for the current rotation state
    pub fn layout(&self, mode: RotationMode) -> ShapeCells {
        catalog::cells(self.shape, self.rotation, mode)
    }

    /// Linear indices the piece covers
    pub fn cells(&self, width: u16, mode: RotationMode) -> PieceCells {
        catalog::linear_offsets(&self.layout(mode), width).map(|offset| self.anchor + offset)
    }

    /// Whether every cell lands in the column its offset asks for.
    ///
    /// A placement that crosses the left or right wall wraps into the
    /// neighbouring row in linear index space; this catches it.
    pub fn is_row_aligned(&self, width: u16, mode: RotationMode) -> bool {
        let w = width as isize;
        let layout = self.layout(mode);
        let cells = self.cells(width, mode);

        // Column minus offset is the same for every cell unless one wrapped.
        let origin = |i: usize| cells[i].rem_euclid(w) - layout[i].0 as isize;
        (1..4).all(|i| origin(i) == origin(0))
    }
}

/// The spawn cells of a new piece are already occupied.
///
/// This is the only terminal condition of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnBlocked {
    pub shape: ShapeId,
}

impl fmt::Display for SpawnBlocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot spawn {} piece: spawn cells occupied", self.shape.as_str())
    }
}

impl std::error::Error for SpawnBlocked {}

/// Result of a gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDown {
    /// The piece moved one row down
    Moved,
    /// The piece rests on something; the caller must lock and respawn
    Landed,
    /// There is no active piece
    Idle,
}

/// Owns the active piece and validates every change against the playfield
#[derive(Debug, Clone)]
pub struct PieceController {
    active: Option<ActivePiece>,
    mode: RotationMode,
}

impl PieceController {
    pub fn new(mode: RotationMode) -> Self {
        Self { active: None, mode }
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn mode(&self) -> RotationMode {
        self.mode
    }

    /// Cells of the active piece on `field`.
    pub fn active_cells(&self, field: &Playfield) -> Option<PieceCells> {
        self.active.map(|p| p.cells(field.width(), self.mode))
    }

    /// Drop the active piece without locking it.
    pub fn clear(&mut self, field: &mut Playfield) {
        if let Some(cells) = self.active_cells(field) {
            field.set_active(&cells, false);
        }
        self.active = None;
    }

    /// Place a new piece at the spawn anchor.
    ///
    /// When any spawn cell is occupied nothing is placed and the controller is
    /// left without an active piece.
    pub fn spawn(&mut self, field: &mut Playfield, shape: ShapeId) -> Result<ActivePiece, SpawnBlocked> {
        self.clear(field);

        let piece = ActivePiece::new(shape, field.width());
        let cells = piece.cells(field.width(), self.mode);
        if field.is_blocked_at(&cells) {
            return Err(SpawnBlocked { shape });
        }

        field.set_active(&cells, true);
        self.active = Some(piece);
        Ok(piece)
    }

    /// One row down, or report that the piece has landed.
    pub fn attempt_move_down(&mut self, field: &mut Playfield) -> MoveDown {
        let Some(piece) = self.active else {
            return MoveDown::Idle;
        };

        let cells = piece.cells(field.width(), self.mode);
        if field.would_collide(&cells) {
            return MoveDown::Landed;
        }

        self.commit(
            field,
            ActivePiece {
                anchor: piece.anchor + field.width() as isize,
                ..piece
            },
        );
        MoveDown::Moved
    }

    /// Shift one column left or right.
    ///
    /// Rejected when any cell already sits on the wall in that direction, or
    /// when the shifted cells are blocked.
    pub fn attempt_move_horizontal(&mut self, field: &mut Playfield, direction: Direction) -> bool {
        let Some(piece) = self.active else {
            return false;
        };

        let width = field.width();
        let edge = match direction {
            Direction::Left => 0,
            Direction::Right => width as isize - 1,
        };
        let cells = piece.cells(width, self.mode);
        if cells.iter().any(|&i| field.column_of(i) == edge) {
            return false;
        }

        let candidate = ActivePiece {
            anchor: piece.anchor + direction.delta(),
            ..piece
        };
        if field.is_blocked_at(&candidate.cells(width, self.mode)) {
            return false;
        }

        self.commit(field, candidate);
        true
    }

    /// Advance the rotation state by one step (clockwise).
    ///
    /// Reverts when the rotated cells are blocked or would wrap across a wall.
    pub fn attempt_rotate(&mut self, field: &mut Playfield) -> bool {
        let Some(piece) = self.active else {
            return false;
        };

        let width = field.width();
        let candidate = ActivePiece {
            rotation: piece.rotation.rotate_cw(),
            ..piece
        };
        if !candidate.is_row_aligned(width, self.mode)
            || field.is_blocked_at(&candidate.cells(width, self.mode))
        {
            return false;
        }

        self.commit(field, candidate);
        true
    }

    /// Write the active piece into the playfield.
    ///
    /// Returns the rows cleared by the lock, `None` without an active piece.
    pub fn lock(&mut self, field: &mut Playfield) -> Option<usize> {
        let piece = self.active.take()?;
        let cells = piece.cells(field.width(), self.mode);
        field.set_active(&cells, false);
        Some(field.lock(&cells))
    }

    fn commit(&mut self, field: &mut Playfield, next: ActivePiece) {
        if let Some(cells) = self.active_cells(field) {
            field.set_active(&cells, false);
        }
        field.set_active(&next.cells(field.width(), self.mode), true);
        self.active = Some(next);
    }
}

impl Default for PieceController {
    fn default() -> Self {
        Self::new(RotationMode::Fixed)
    }
}
