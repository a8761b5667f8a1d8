//! Board module - manages the game grid
//!
//! The board is a `height x width` grid where each cell is empty (`0`) or holds
//! a color id. Cells are stored in a flat vector, row-major.
//! Coordinates: (row, col) where row 0 is the top and row `height - 1` is the floor.

use blockfall_types::{Cell, EMPTY};

/// Largest width or height a board accepts.
///
/// Coordinates are `i16`; moves and quarter turns reach at most three squares
/// past the board edge, which must still fit.
pub const MAX_DIMENSION: usize = i16::MAX as usize - 4;

/// The game grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or larger than [`MAX_DIMENSION`].
    pub fn new(width: usize, height: usize) -> Self {
        check_dimensions(width, height);
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(&self, row: i16, col: i16) -> Option<usize> {
        if !self.in_bounds(row, col) {
            return None;
        }
        Some((row as usize) * self.width + (col as usize))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if position is inside the grid
    pub fn in_bounds(&self, row: i16, col: i16) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width
    }

    /// Get cell at position (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i16, col: i16) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at position (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i16, col: i16, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, row: i16, col: i16) -> bool {
        matches!(self.get(row, col), Some(cell) if cell != EMPTY)
    }

    /// One row of cells, or None past the floor
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.height {
            return None;
        }
        let start = row * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// All rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row)
            .is_some_and(|cells| !cells.is_empty() && cells.iter().all(|&cell| cell != EMPTY))
    }

    /// Clear a row and shift every row above it down by one.
    /// The top row is zero-filled.
    pub fn clear_row(&mut self, row: usize) {
        if row >= self.height {
            return;
        }

        let width = self.width;
        // copy_within handles overlapping ranges
        self.cells.copy_within(0..row * width, width);
        self.cells[..width].fill(EMPTY);
    }

    /// Clear all full rows and return how many were cleared.
    ///
    /// Scans from the floor upward. After clearing row `r` the scan stays on
    /// `r`, since the row that slid into it may itself be full; the index only
    /// moves up past a row that was not cleared.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut row = self.height;

        while row > 0 {
            if self.is_row_full(row - 1) {
                self.clear_row(row - 1);
                cleared += 1;
            } else {
                row -= 1;
            }
        }

        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid into a row-major matrix
    pub fn to_matrix(&self) -> Vec<Vec<Cell>> {
        self.rows().map(|r| r.to_vec()).collect()
    }

    /// Build a board from rows; every row must have the same length.
    ///
    /// # Panics
    ///
    /// Panics on ragged rows or on dimensions [`Board::new`] would reject.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        check_dimensions(width, height);
        assert!(
            rows.iter().all(|r| r.len() == width),
            "all rows must be {width} cells wide"
        );
        Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }
}

fn check_dimensions(width: usize, height: usize) {
    assert!(
        (1..=MAX_DIMENSION).contains(&width) && (1..=MAX_DIMENSION).contains(&height),
        "a {width}x{height} board is outside 1..={MAX_DIMENSION} in some dimension"
    );
}
