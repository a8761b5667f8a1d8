//! Game state module - the board state machine
//!
//! Ties together the grid, the active and next pieces, the piece factory and
//! scoring. The active piece is always painted into the grid, so the grid alone
//! is enough to render a frame.
//!
//! Phases:
//! - `Falling`: the active piece may still descend
//! - `Locking`: a gravity tick found the piece resting; the next tick locks it
//!   unless a move or rotation lets it fall again
//! - `GameOver`: a spawned piece overlapped the stack (terminal)

use blockfall_types::{Cell, GameAction, RotateDirection, EMPTY};

use crate::board::{Board, MAX_DIMENSION};
use crate::pieces::{spawn_column, Piece, Square};
use crate::rng::PieceFactory;
use crate::scoring::line_clear_points;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Falling,
    Locking,
    GameOver,
}

/// Result of a single lock event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockReport {
    pub rows_cleared: usize,
    pub points: u32,
    /// The replacement piece could not spawn
    pub game_over: bool,
}

/// What a gravity tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The piece moved down one row
    Fell,
    /// The piece is resting and will lock on the next tick
    Landed,
    /// The piece locked
    Locked(LockReport),
    /// Nothing to do; the game is over
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Piece,
    next: Piece,
    factory: PieceFactory,
    phase: Phase,
    score: u32,
    lines: u32,
    pieces_locked: u32,
    /// Last lock event (consumed by observers).
    last_lock: Option<LockReport>,
}

impl GameState {
    /// Create a new game on an empty `width x height` board.
    ///
    /// # Panics
    ///
    /// Panics if the board is too small to spawn every shape (width < 4 or height < 3)
    /// or either dimension exceeds [`MAX_DIMENSION`].
    pub fn new(width: usize, height: usize, seed: u32) -> Self {
        assert!(
            width >= 4 && height >= 3,
            "a {width}x{height} board cannot hold every shape"
        );
        assert!(
            width <= MAX_DIMENSION && height <= MAX_DIMENSION,
            "a {width}x{height} board does not fit i16 coordinates (limit {MAX_DIMENSION})"
        );
        let mut factory = PieceFactory::new(seed, spawn_column(width));
        let active = factory.random();
        let next = factory.random();
        Self::with_board(Board::new(width, height), active, next, factory)
    }

    /// Start from an existing grid with a chosen active and next piece.
    ///
    /// The active piece is painted into the grid; if it overlaps occupied
    /// cells the game starts in `GameOver`.
    pub fn with_board(board: Board, active: Piece, next: Piece, factory: PieceFactory) -> Self {
        let mut state = Self {
            board,
            active,
            next,
            factory,
            phase: Phase::Falling,
            score: 0,
            lines: 0,
            pieces_locked: 0,
            last_lock: None,
        };

        if state.is_blocked(active.squares()) {
            state.phase = Phase::GameOver;
        } else {
            state.paint_active();
        }
        state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    /// The active piece (after game over, the last piece that was active)
    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn next(&self) -> &Piece {
        &self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Take and clear the last lock event.
    pub fn take_last_lock(&mut self) -> Option<LockReport> {
        self.last_lock.take()
    }

    /// True if any square lands on an occupied cell
    fn is_blocked(&self, squares: &[Square; 4]) -> bool {
        squares.iter().any(|&(r, c)| self.board.is_occupied(r, c))
    }

    /// Check that squares are in bounds and only cover empty cells or the active piece
    fn fits(&self, squares: &[Square; 4]) -> bool {
        squares.iter().all(|&(r, c)| match self.board.get(r, c) {
            Some(EMPTY) => true,
            Some(_) => self.active.occupies(r, c),
            None => false,
        })
    }

    fn paint(&mut self, cell: Cell) {
        for &(r, c) in self.active.squares() {
            self.board.set(r, c, cell);
        }
    }

    fn paint_active(&mut self) {
        self.paint(self.active.color());
    }

    fn erase_active(&mut self) {
        self.paint(EMPTY);
    }

    /// Move the active piece to `squares` if they fit; no mutation otherwise
    fn try_place(&mut self, squares: [Square; 4]) -> bool {
        if self.phase == Phase::GameOver || !self.fits(&squares) {
            return false;
        }

        self.erase_active();
        self.active = self.active.with_squares(squares);
        self.paint_active();

        // A piece nudged off a ledge starts falling again.
        if self.phase == Phase::Locking && self.can_fall() {
            self.phase = Phase::Falling;
        }
        true
    }

    /// Try to move the active piece `dx` columns and `dy` rows
    pub fn try_move(&mut self, dx: i16, dy: i16) -> bool {
        let squares = self.active.translated(dx, dy);
        self.try_place(squares)
    }

    /// Try to rotate the active piece about its pivot.
    ///
    /// All four squares are validated before anything changes; a single
    /// blocked square rejects the whole rotation.
    pub fn rotate(&mut self, direction: RotateDirection) -> bool {
        let squares = self.active.rotated(direction);
        self.try_place(squares)
    }

    /// Whether the active piece can descend one row.
    ///
    /// Only the bottommost square of each column is tested against the cell
    /// beneath it; the squares above it in the same column rest on the piece itself.
    pub fn can_fall(&self) -> bool {
        if self.phase == Phase::GameOver {
            return false;
        }
        let floor = self.board.height() as i16 - 1;
        let squares = self.active.squares();

        for &(r, c) in squares {
            if r == floor {
                return false;
            }
            let bottommost = !squares.iter().any(|&(r2, c2)| c2 == c && r2 > r);
            if bottommost && self.board.is_occupied(r + 1, c) {
                return false;
            }
        }
        true
    }

    fn fall(&mut self) {
        self.erase_active();
        self.active = self.active.with_squares(self.active.translated(0, 1));
        self.paint_active();
    }

    /// Gravity tick
    pub fn tick(&mut self) -> TickOutcome {
        match self.phase {
            Phase::GameOver => TickOutcome::GameOver,
            Phase::Falling | Phase::Locking if self.can_fall() => {
                self.phase = Phase::Falling;
                self.fall();
                TickOutcome::Fell
            }
            Phase::Falling => {
                self.phase = Phase::Locking;
                TickOutcome::Landed
            }
            Phase::Locking => TickOutcome::Locked(self.lock()),
        }
    }

    /// Commit the active piece, clear full rows, score, and spawn the next piece.
    pub fn lock(&mut self) -> LockReport {
        if self.phase == Phase::GameOver {
            return LockReport {
                game_over: true,
                ..LockReport::default()
            };
        }

        let rows_cleared = self.board.clear_full_rows();
        let points = line_clear_points(rows_cleared);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(rows_cleared as u32);
        self.pieces_locked = self.pieces_locked.saturating_add(1);

        let spawned = self.factory.respawn(&self.next);
        let game_over = self.is_blocked(spawned.squares());
        if game_over {
            self.phase = Phase::GameOver;
        } else {
            self.active = spawned;
            self.next = self.factory.random();
            self.paint_active();
            self.phase = Phase::Falling;
        }

        let report = LockReport {
            rows_cleared,
            points,
            game_over,
        };
        self.last_lock = Some(report);
        report
    }

    /// Drop the active piece as far as it goes, then lock immediately
    pub fn hard_drop(&mut self) -> LockReport {
        if self.phase == Phase::GameOver {
            return self.lock();
        }
        while self.try_move(0, 1) {}
        self.lock()
    }

    /// Move the active piece down one row
    pub fn soft_drop(&mut self) -> bool {
        self.try_move(0, 1)
    }

    /// Apply a game action.
    ///
    /// `Pause` belongs to the caller's loop and is not handled here.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => {
                if self.game_over() {
                    return false;
                }
                self.hard_drop();
                true
            }
            GameAction::RotateCw => self.rotate(RotateDirection::Clockwise),
            GameAction::RotateCcw => self.rotate(RotateDirection::CounterClockwise),
            GameAction::Pause => false,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(blockfall_types::BOARD_WIDTH, blockfall_types::BOARD_HEIGHT, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(board: Board, active: Piece) -> GameState {
        let next = Piece::new(1, 2, spawn_column(board.width()));
        let factory = PieceFactory::new(1, spawn_column(board.width()));
        GameState::with_board(board, active, next, factory)
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(10, 20, 12345);
        assert_eq!(state.phase(), Phase::Falling);
        assert_eq!(state.score(), 0);
        for &(r, c) in state.active().squares() {
            assert_eq!(state.board().get(r, c), Some(state.active().color()));
        }
        assert_eq!(
            state.board().cells().iter().filter(|&&c| c != EMPTY).count(),
            4
        );
    }

    #[test]
    #[should_panic(expected = "does not fit i16 coordinates")]
    fn test_oversized_board_rejected() {
        GameState::new(10, 40_000, 1);
    }

    #[test]
    #[should_panic(expected = "cannot hold every shape")]
    fn test_undersized_board_rejected() {
        GameState::new(3, 20, 1);
    }

    #[test]
    fn test_rotation_past_floor_of_tallest_board() {
        let floor = (MAX_DIMENSION - 1) as i16;
        let straight = Piece::new(0, 2, 1).with_squares([(floor, 0), (floor, 1), (floor, 2), (floor, 3)]);
        let mut state = state_with(Board::new(4, MAX_DIMENSION), straight);

        assert!(!state.rotate(RotateDirection::Clockwise));
        assert!(!state.try_move(0, 1));
        assert_eq!(state.active().squares(), &[(floor, 0), (floor, 1), (floor, 2), (floor, 3)]);
    }

    #[test]
    fn test_try_move() {
        let mut state = state_with(Board::new(10, 20), Piece::new(1, 3, 4));
        assert!(state.try_move(1, 0));
        assert_eq!(state.active().squares(), &[(0, 5), (0, 6), (1, 5), (1, 6)]);
        // Old cells cleared, new ones painted
        assert_eq!(state.board().get(0, 4), Some(EMPTY));
        assert_eq!(state.board().get(1, 4), Some(EMPTY));
        assert_eq!(state.board().get(1, 6), Some(3));
    }

    #[test]
    fn test_try_move_out_of_bounds() {
        let mut state = state_with(Board::new(10, 20), Piece::new(0, 1, 4));
        assert!(!state.try_move(0, -1));
        for _ in 0..3 {
            assert!(state.try_move(-1, 0));
        }
        let before = state.board().clone();
        assert!(!state.try_move(-1, 0));
        assert_eq!(state.board(), &before);
    }

    #[test]
    fn test_can_fall_uses_bottommost_square_per_column() {
        // L piece: column 4 holds rows 0..=2, column 5 holds row 2.
        let mut board = Board::new(10, 20);
        board.set(4, 5, 8);
        let mut state = state_with(board, Piece::new(2, 1, 4));

        // Row 3 below column 4 and 5 is empty; the cells directly under the
        // upper squares of column 4 are the piece itself.
        assert!(state.can_fall());
        assert_eq!(state.tick(), TickOutcome::Fell);
        // Now (3,5) sits on the block at (4,5).
        assert!(!state.can_fall());
    }

    #[test]
    fn test_tick_lands_then_locks() {
        let mut state = state_with(Board::new(10, 4), Piece::new(1, 3, 4));
        assert_eq!(state.tick(), TickOutcome::Fell);
        assert_eq!(state.tick(), TickOutcome::Fell);
        assert_eq!(state.tick(), TickOutcome::Landed);
        assert_eq!(state.phase(), Phase::Locking);
        assert!(matches!(state.tick(), TickOutcome::Locked(_)));
        assert_eq!(state.phase(), Phase::Falling);
        assert_eq!(state.pieces_locked(), 1);
        assert_eq!(state.board().get(3, 4), Some(3));
    }

    #[test]
    fn test_move_off_ledge_resumes_falling() {
        let mut board = Board::new(10, 6);
        board.set(2, 4, 7);
        // Straight piece on row 1 resting on the block at (2,4).
        let active = Piece::new(0, 1, 4).with_squares([(1, 4), (1, 3), (1, 5), (1, 6)]);
        let mut state = state_with(board, active);
        assert_eq!(state.tick(), TickOutcome::Landed);
        assert!(state.try_move(3, 0));
        assert_eq!(state.phase(), Phase::Falling);
        assert_eq!(state.tick(), TickOutcome::Fell);
    }

    #[test]
    fn test_rotation_rejected_is_atomic() {
        // Vertical straight piece against the left wall: rotating would put
        // squares at negative columns.
        let active = Piece::new(0, 4, 4).with_squares([(5, 0), (4, 0), (6, 0), (7, 0)]);
        let mut state = state_with(Board::new(10, 20), active);
        let board_before = state.board().clone();
        let piece_before = *state.active();

        assert!(!state.rotate(RotateDirection::Clockwise));
        assert_eq!(state.board(), &board_before);
        assert_eq!(state.active(), &piece_before);
    }

    #[test]
    fn test_rotation_into_stack_rejected() {
        let mut board = Board::new(10, 20);
        board.set(6, 4, 2);
        // T piece pointing down at rows 5-6, pivot (5,4); a CW turn needs (6,4).
        let active = Piece::new(4, 1, 4).with_squares([(5, 4), (5, 5), (5, 6), (6, 5)]);
        let mut state = state_with(board, active);
        assert!(!state.rotate(RotateDirection::Clockwise));
        assert_eq!(state.active().squares(), &[(5, 4), (5, 5), (5, 6), (6, 5)]);
    }

    #[test]
    fn test_four_rotations_identity() {
        for shape in 0..5 {
            let start = Piece::new(shape, 1, 4).with_squares(
                Piece::new(shape, 1, 4).translated(0, 8),
            );
            for direction in [RotateDirection::Clockwise, RotateDirection::CounterClockwise] {
                let mut state = state_with(Board::new(10, 20), start);
                for _ in 0..4 {
                    assert!(state.rotate(direction), "shape {shape} {direction:?}");
                }
                assert_eq!(state.active().squares(), start.squares());
            }
        }
    }

    #[test]
    fn test_hard_drop_locks_and_spawns_next() {
        let mut state = state_with(Board::new(10, 20), Piece::new(1, 3, 4));
        let report = state.hard_drop();
        assert_eq!(report, LockReport::default());
        assert_eq!(state.board().get(19, 4), Some(3));
        assert_eq!(state.board().get(18, 5), Some(3));
        // The next piece (square, color 2) is now active at spawn.
        assert_eq!(state.active(), &Piece::new(1, 2, 4));
        assert_eq!(state.board().get(0, 4), Some(2));
        assert_eq!(state.take_last_lock(), Some(report));
        assert_eq!(state.take_last_lock(), None);
    }

    #[test]
    fn test_spawn_onto_stack_is_game_over() {
        let mut board = Board::new(10, 20);
        // Block the spawn area of the next (square) piece but leave room
        // below for the active piece to drop.
        board.set(1, 5, 6);
        let active = Piece::new(0, 1, 4).with_squares([(10, 4), (10, 3), (10, 5), (10, 6)]);
        let mut state = state_with(board, active);

        let report = state.hard_drop();
        assert!(report.game_over);
        assert_eq!(state.phase(), Phase::GameOver);

        let frozen = state.board().clone();
        assert_eq!(state.tick(), TickOutcome::GameOver);
        assert!(!state.try_move(1, 0));
        assert!(!state.rotate(RotateDirection::Clockwise));
        assert_eq!(state.board(), &frozen);
    }

    #[test]
    fn test_apply_action_pause_is_ignored() {
        let mut state = GameState::default();
        let before = state.board().clone();
        assert!(!state.apply_action(GameAction::Pause));
        assert_eq!(state.board(), &before);
    }
}
