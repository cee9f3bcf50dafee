//! Playfield module - manages the game grid
//!
//! The playfield is a `width x height` grid of cells plus one boundary row below
//! the last playable row. Every boundary cell is permanently occupied, so
//! "landed on the floor" is detected by the same occupancy check used for
//! stacked pieces.
//!
//! Cells are stored in a flat row-major buffer and addressed by linear index
//! (`y * width + x`). Pieces are described by the 4 linear indices they cover.

use std::fmt;

use crate::types::{Cell, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_DIMENSION, MIN_DIMENSION};

/// Linear indices covered by a piece. Signed so that probes above the top row
/// or past the boundary row can be expressed and rejected.
pub type PieceCells = [isize; 4];

/// A probe landed outside `[0, width * (height + 1))`.
///
/// This is a blocking condition, not a fatal error: callers treat it exactly
/// like an occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds {
    pub index: isize,
}

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell index {} is outside the playfield", self.index)
    }
}

impl std::error::Error for OutOfBounds {}

/// The game grid - playable rows followed by one permanently occupied boundary row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playfield {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x), `height + 1` rows
    cells: Vec<Cell>,
}

impl Playfield {
    /// Create an empty playfield with the boundary row in place.
    ///
    /// Dimensions are clamped to [`MIN_DIMENSION`]..=[`MAX_DIMENSION`];
    /// smaller grids cannot hold the catalog shapes.
    pub fn new(width: u16, height: u16) -> Self {
        let width = width.clamp(MIN_DIMENSION, MAX_DIMENSION);
        let height = height.clamp(MIN_DIMENSION, MAX_DIMENSION);
        let playable = width as usize * height as usize;

        let mut cells = vec![Cell::EMPTY; playable + width as usize];
        for cell in &mut cells[playable..] {
            *cell = Cell::SOLID;
        }

        Self {
            width,
            height,
            cells,
        }
    }

    /// The reference 10x20 playfield.
    pub fn standard() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// Number of playable rows (the boundary row is not counted).
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Total cell count including the boundary row: `width * (height + 1)`.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// First linear index of the boundary row.
    pub fn boundary_start(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline(always)]
    fn slot(&self, index: isize) -> Option<usize> {
        if index < 0 || index as usize >= self.cells.len() {
            return None;
        }
        Some(index as usize)
    }

    /// Linear index of `(x, y)`; `y == height` addresses the boundary row.
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y > self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Column of a linear index (Euclidean, so negative probes map into `0..width`).
    #[inline(always)]
    pub fn column_of(&self, index: isize) -> isize {
        index.rem_euclid(self.width as isize)
    }

    /// Get the cell at a linear index, `None` when out of bounds.
    pub fn cell(&self, index: isize) -> Option<Cell> {
        self.slot(index).map(|i| self.cells[i])
    }

    /// Occupancy at a linear index.
    pub fn is_occupied(&self, index: isize) -> Result<bool, OutOfBounds> {
        self.slot(index)
            .map(|i| self.cells[i].occupied)
            .ok_or(OutOfBounds { index })
    }

    /// Out-of-bounds or occupied.
    #[inline(always)]
    pub fn is_blocked(&self, index: isize) -> bool {
        self.is_occupied(index).unwrap_or(true)
    }

    /// Whether the piece, shifted one row down, would overlap anything.
    pub fn would_collide(&self, cells: &PieceCells) -> bool {
        let step = self.width as isize;
        cells.iter().any(|&i| self.is_blocked(i + step))
    }

    /// Whether any candidate cell is out of bounds or occupied.
    pub fn is_blocked_at(&self, cells: &PieceCells) -> bool {
        cells.iter().any(|&i| self.is_blocked(i))
    }

    /// Mark a playable cell occupied or free.
    ///
    /// Returns false for out-of-bounds indices and for the boundary row, which
    /// can never be changed.
    pub fn set_occupied(&mut self, index: isize, occupied: bool) -> bool {
        match self.slot(index) {
            Some(i) if i < self.boundary_start() => {
                self.cells[i].occupied = occupied;
                true
            }
            _ => false,
        }
    }

    /// Set or clear the render-only `active` flag on playable cells.
    pub fn set_active(&mut self, cells: &PieceCells, active: bool) {
        let boundary = self.boundary_start();
        for &index in cells {
            if let Some(i) = self.slot(index) {
                if i < boundary {
                    self.cells[i].active = active;
                }
            }
        }
    }

    /// Write a piece into the grid without clearing rows.
    ///
    /// Indices outside the playable area are skipped.
    pub fn absorb(&mut self, cells: &PieceCells) {
        let boundary = self.boundary_start();
        for &index in cells {
            if let Some(i) = self.slot(index) {
                if i < boundary {
                    self.cells[i] = Cell::SOLID;
                }
            }
        }
    }

    /// Lock a piece into the grid and clear any completed rows.
    ///
    /// Returns the number of rows cleared.
    pub fn lock(&mut self, cells: &PieceCells) -> usize {
        self.absorb(cells);
        self.clear_full_rows()
    }

    /// Check if a playable row is completely filled.
    ///
    /// The boundary row is never reported as full.
    pub fn is_row_full(&self, y: usize) -> bool {
        match self.row(y) {
            Some(row) => row.iter().all(|cell| cell.occupied),
            None => false,
        }
    }

    /// Remove playable row `y`: every row above shifts down by one and the top
    /// row becomes empty. Returns 1 if a row was removed, 0 otherwise.
    pub fn clear_row(&mut self, y: usize) -> usize {
        if y >= self.height as usize {
            return 0;
        }

        let width = self.width as usize;

        // copy_within handles the overlapping ranges.
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }

        for cell in &mut self.cells[0..width] {
            *cell = Cell::EMPTY;
        }

        1
    }

    /// Clear all full playable rows, scanning top to bottom.
    ///
    /// Returns the number of rows removed. Clearing row `y` only moves rows
    /// `0..y`, which were already scanned and are not full, so a single pass
    /// finds every full row.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        for y in 0..self.height as usize {
            if self.is_row_full(y) {
                cleared += self.clear_row(y);
            }
        }
        cleared
    }

    /// Empty every playable cell; the boundary row stays occupied.
    pub fn reset(&mut self) {
        let boundary = self.boundary_start();
        for cell in &mut self.cells[..boundary] {
            *cell = Cell::EMPTY;
        }
    }

    /// Playable row `y`, `None` for the boundary row or beyond.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let width = self.width as usize;
        let start = y * width;
        Some(&self.cells[start..start + width])
    }

    /// The boundary row.
    pub fn boundary_row(&self) -> &[Cell] {
        &self.cells[self.boundary_start()..]
    }

    /// All cells, boundary row included.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The playable cells only.
    pub fn playable_cells(&self) -> &[Cell] {
        &self.cells[..self.boundary_start()]
    }

    /// Number of occupied playable cells.
    pub fn occupied_count(&self) -> usize {
        self.playable_cells().iter().filter(|c| c.occupied).count()
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::standard()
    }
}
