//! Pieces module - shape table, pieces and the rotation engine
//!
//! Every shape is four `(row, col)` offsets relative to the spawn origin.
//! The first offset is the pivot: rotation is computed about `squares[0]`,
//! which a quarter turn leaves in place, so the pivot never drifts.

use blockfall_types::{Cell, RotateDirection, COLOR_COUNT, SHAPE_COUNT};

/// Absolute `(row, col)` position of a single square
pub type Square = (i16, i16);

/// Offset of a single square relative to the spawn origin, `(row, col)`
pub type ShapeOffset = (i16, i16);

/// Shape of a piece - 4 offsets, pivot first
pub type PieceShape = [ShapeOffset; 4];

/// Canonical shapes, indexed by shape id
///
/// Offsets are relative to the spawn column; on a 10-wide board (spawn
/// column 4) they land on columns 3..=6.
pub const SHAPES: [PieceShape; SHAPE_COUNT as usize] = [
    // straight
    [(0, -1), (0, 0), (0, 1), (0, 2)],
    // square
    [(0, 0), (0, 1), (1, 0), (1, 1)],
    // L
    [(0, 0), (1, 0), (2, 0), (2, 1)],
    // skew
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    // T
    [(0, 0), (0, 1), (0, 2), (1, 1)],
];

/// Get the canonical offsets for a shape id
pub fn get_shape(shape_id: u8) -> &'static PieceShape {
    &SHAPES[shape_id as usize]
}

/// Spawn column for a board of the given width
pub fn spawn_column(width: usize) -> i16 {
    (width / 2).saturating_sub(1) as i16
}

/// A piece occupying exactly four squares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    shape_id: u8,
    color: Cell,
    squares: [Square; 4],
}

impl Piece {
    /// Create a piece at its canonical spawn position.
    ///
    /// # Panics
    ///
    /// Panics if `shape_id` is not a defined shape or `color` is not in `1..=8`;
    /// both are programming errors, not runtime conditions.
    pub fn new(shape_id: u8, color: Cell, spawn_col: i16) -> Self {
        assert!(
            shape_id < SHAPE_COUNT,
            "shape id {shape_id} is not one of the {SHAPE_COUNT} defined shapes"
        );
        assert!(
            (1..=COLOR_COUNT).contains(&color),
            "color id {color} is outside 1..={COLOR_COUNT}"
        );

        let mut squares = [(0, 0); 4];
        for (square, &(dr, dc)) in squares.iter_mut().zip(get_shape(shape_id)) {
            *square = (dr, spawn_col + dc);
        }

        Self {
            shape_id,
            color,
            squares,
        }
    }

    pub fn shape_id(&self) -> u8 {
        self.shape_id
    }

    pub fn color(&self) -> Cell {
        self.color
    }

    pub fn squares(&self) -> &[Square; 4] {
        &self.squares
    }

    /// The rotation pivot, derived from the current squares
    pub fn pivot(&self) -> Square {
        self.squares[0]
    }

    /// Whether any square of this piece sits at `(row, col)`
    pub fn occupies(&self, row: i16, col: i16) -> bool {
        self.squares.contains(&(row, col))
    }

    /// The same piece moved to `squares` (pivot first)
    pub fn with_squares(self, squares: [Square; 4]) -> Self {
        Self { squares, ..self }
    }

    /// Squares translated by `dx` columns and `dy` rows
    pub fn translated(&self, dx: i16, dy: i16) -> [Square; 4] {
        self.squares.map(|(r, c)| (r + dy, c + dx))
    }

    /// Squares after rotating in `direction` about the pivot
    pub fn rotated(&self, direction: RotateDirection) -> [Square; 4] {
        rotate_squares(&self.squares, direction)
    }

    /// Canonical offsets normalized to their bounding box, for previews
    pub fn preview_matrix(&self) -> Vec<Vec<Cell>> {
        shape_matrix(self.shape_id, self.color)
    }
}

/// Rotate four squares a quarter turn clockwise about `squares[0]`.
///
/// Rows grow downward, so the map `(dr, dc) -> (dc, -dr)` turns
/// "right of the pivot" into "below the pivot".
pub fn rotate_cw(squares: &[Square; 4]) -> [Square; 4] {
    let (pr, pc) = squares[0];
    squares.map(|(r, c)| {
        let (dr, dc) = (r - pr, c - pc);
        (pr + dc, pc - dr)
    })
}

/// Rotate four squares in `direction` about `squares[0]`.
///
/// Counter-clockwise is three clockwise quarter turns, so the two
/// directions are exact inverses.
pub fn rotate_squares(squares: &[Square; 4], direction: RotateDirection) -> [Square; 4] {
    let mut out = *squares;
    for _ in 0..direction.quarter_turns() {
        out = rotate_cw(&out);
    }
    out
}

/// A shape drawn into the smallest matrix that holds it
pub fn shape_matrix(shape_id: u8, color: Cell) -> Vec<Vec<Cell>> {
    let shape = get_shape(shape_id);
    let min_r = shape.iter().map(|&(r, _)| r).min().unwrap_or(0);
    let min_c = shape.iter().map(|&(_, c)| c).min().unwrap_or(0);
    let max_r = shape.iter().map(|&(r, _)| r).max().unwrap_or(0);
    let max_c = shape.iter().map(|&(_, c)| c).max().unwrap_or(0);

    let mut matrix = vec![vec![0; (max_c - min_c + 1) as usize]; (max_r - min_r + 1) as usize];
    for &(r, c) in shape {
        matrix[(r - min_r) as usize][(c - min_c) as usize] = color;
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_positions_on_default_board() {
        let col = spawn_column(10);
        assert_eq!(col, 4);
        assert_eq!(Piece::new(0, 1, col).squares(), &[(0, 3), (0, 4), (0, 5), (0, 6)]);
        assert_eq!(Piece::new(1, 1, col).squares(), &[(0, 4), (0, 5), (1, 4), (1, 5)]);
        assert_eq!(Piece::new(2, 1, col).squares(), &[(0, 4), (1, 4), (2, 4), (2, 5)]);
        assert_eq!(Piece::new(3, 1, col).squares(), &[(0, 4), (1, 4), (1, 5), (2, 5)]);
        assert_eq!(Piece::new(4, 1, col).squares(), &[(0, 4), (0, 5), (0, 6), (1, 5)]);
    }

    #[test]
    fn test_pivot_is_first_square() {
        let piece = Piece::new(2, 3, 4);
        assert_eq!(piece.pivot(), piece.squares()[0]);
    }

    #[test]
    fn test_rotate_cw_quarter_turn() {
        // Horizontal straight piece about (5, 4): becomes vertical through column 4.
        let squares = [(5, 4), (5, 3), (5, 5), (5, 6)];
        assert_eq!(rotate_cw(&squares), [(5, 4), (4, 4), (6, 4), (7, 4)]);
    }

    #[test]
    fn test_rotation_keeps_pivot_fixed() {
        let piece = Piece::new(4, 1, 4);
        for direction in [RotateDirection::Clockwise, RotateDirection::CounterClockwise] {
            assert_eq!(piece.rotated(direction)[0], piece.pivot());
        }
    }

    #[test]
    fn test_ccw_undoes_cw() {
        let piece = Piece::new(3, 2, 4).with_squares([(8, 4), (9, 4), (9, 5), (10, 5)]);
        let cw = rotate_squares(piece.squares(), RotateDirection::Clockwise);
        let back = rotate_squares(&cw, RotateDirection::CounterClockwise);
        assert_eq!(&back, piece.squares());
    }

    #[test]
    fn test_shape_matrix_t() {
        assert_eq!(shape_matrix(4, 7), vec![vec![7, 7, 7], vec![0, 7, 0]]);
    }

    #[test]
    #[should_panic(expected = "shape id")]
    fn test_undefined_shape_panics() {
        let _ = Piece::new(SHAPE_COUNT, 1, 4);
    }

    #[test]
    #[should_panic(expected = "color id")]
    fn test_color_zero_panics() {
        let _ = Piece::new(0, 0, 4);
    }

    #[test]
    #[should_panic(expected = "color id")]
    fn test_color_nine_panics() {
        let _ = Piece::new(0, 9, 4);
    }
}
