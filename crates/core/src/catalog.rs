//! Catalog module - shape definitions
//!
//! Each shape has exactly one canonical table of 4 `(dx, dy)` cells relative to
//! its anchor. Linear offsets (`dy * width + dx`) are derived from it for a
//! given playfield width. Orientations are never tabulated: in
//! [`RotationMode::Geometric`] they are computed by turning the canonical cells
//! inside the shape's bounding box.

use crate::rng::SimpleRng;
use crate::types::{Rotation, RotationMode, ShapeId};

/// Offset of a single cell relative to the anchor (column, row)
pub type CellOffset = (i8, i8);

/// Cell layout of one orientation - 4 offsets from the anchor
pub type ShapeCells = [CellOffset; 4];

/// Canonical (spawn) cells for a shape.
pub fn canonical_cells(shape: ShapeId) -> ShapeCells {
    match shape {
        ShapeId::L => [(1, 0), (1, 1), (1, 2), (2, 0)],
        ShapeId::Z => [(0, 0), (0, 1), (1, 1), (1, 2)],
        ShapeId::T => [(1, 0), (0, 1), (1, 1), (2, 1)],
        ShapeId::Square => [(0, 0), (1, 0), (0, 1), (1, 1)],
        ShapeId::I => [(1, 0), (1, 1), (1, 2), (1, 3)],
    }
}

/// Side of the square box the shape turns in.
pub fn bounding_size(shape: ShapeId) -> i8 {
    match shape {
        ShapeId::Square => 2,
        ShapeId::I => 4,
        ShapeId::L | ShapeId::Z | ShapeId::T => 3,
    }
}

/// Cells for a shape at a rotation state.
///
/// `Fixed` ignores the rotation state entirely.
pub fn cells(shape: ShapeId, rotation: Rotation, mode: RotationMode) -> ShapeCells {
    let base = canonical_cells(shape);
    if mode == RotationMode::Fixed || shape == ShapeId::Square {
        return base;
    }

    let n = bounding_size(shape);
    let mut out = base;
    for _ in 0..rotation.index() {
        for cell in &mut out {
            let (x, y) = *cell;
            *cell = (n - 1 - y, x);
        }
    }
    out
}

/// Linear offsets of a cell layout on a playfield of the given width.
pub fn linear_offsets(cells: &ShapeCells, width: u16) -> [isize; 4] {
    let w = width as isize;
    cells.map(|(dx, dy)| dy as isize * w + dx as isize)
}

/// Canonical linear offsets of a shape for the given width.
///
/// # Examples
///
/// ```
/// use tui_blocks_core::catalog::offsets;
/// use tui_blocks_core::types::ShapeId;
///
/// assert_eq!(offsets(ShapeId::L, 10), [1, 11, 21, 2]);
/// assert_eq!(offsets(ShapeId::Square, 10), [0, 1, 10, 11]);
/// ```
pub fn offsets(shape: ShapeId, width: u16) -> [isize; 4] {
    linear_offsets(&canonical_cells(shape), width)
}

/// Uniform choice among the five shapes.
pub fn random_shape(rng: &mut SimpleRng) -> ShapeId {
    ShapeId::ALL[rng.next_range(ShapeId::ALL.len() as u32) as usize]
}
