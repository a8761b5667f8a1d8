//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds all the game rules and state. It has **no dependencies**
//! on terminal I/O, so it runs the same headless, in tests and in benchmarks.
//!
//! # Module Structure
//!
//! - [`board`]: the cell grid with line-clear compaction
//! - [`game_state`]: the board state machine (move, rotate, gravity, lock)
//! - [`pieces`]: the shape table, pieces and the pivot rotation engine
//! - [`rng`]: seedable uniform piece factory
//! - [`scoring`]: rows-cleared to points lookup
//! - [`gravity`]: wall-clock gravity timer with pause support
//!
//! # Game Rules
//!
//! - **Five shapes**: straight, square, L, skew and T, each in one of 8 colors
//! - **Pivot rotation**: quarter turns about the first square, no wall kicks
//! - **Gravity**: one row per tick; a resting piece locks on the following tick
//! - **Hard drop**: falls as far as possible and locks at once
//! - **Scoring**: 40 / 100 / 300 / 1200 for 1-4 rows in one lock
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameState, Phase};
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::new(10, 20, 12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.pieces_locked(), 1);
//! assert_eq!(game.phase(), Phase::Falling);
//! ```

pub mod board;
pub mod game_state;
pub mod gravity;
pub mod pieces;
pub mod rng;
pub mod scoring;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, MAX_DIMENSION};
pub use game_state::{GameState, LockReport, Phase, TickOutcome};
pub use gravity::GravityClock;
pub use pieces::{get_shape, rotate_squares, shape_matrix, spawn_column, Piece, Square};
pub use rng::{PieceFactory, SimpleRng};
pub use scoring::line_clear_points;
