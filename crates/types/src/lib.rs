//! Shared types - plain data structures and constants
//!
//! Everything here is pure data with no external dependencies, so it can be
//! used from the game core, the rasterizer and the input layer alike.
//!
//! # Board Dimensions
//!
//! Default playfield dimensions (callers may pick others at construction time):
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//!
//! # Cells
//!
//! A [`Cell`] is a plain byte: `0` is empty and `1..=8` is a color id.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, RotateDirection, BOARD_HEIGHT, BOARD_WIDTH, LINE_SCORES};
//!
//! // Parse a game action (case-insensitive)
//! let action = GameAction::from_str("moveLeft").unwrap();
//! assert_eq!(action, GameAction::MoveLeft);
//!
//! // Rotation directions are inverses of each other
//! assert_eq!(RotateDirection::Clockwise.reverse(), RotateDirection::CounterClockwise);
//!
//! // Board dimensions and scoring
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! assert_eq!(LINE_SCORES[4], 1200);
//! ```

/// Default board width in cells
pub const BOARD_WIDTH: usize = 10;

/// Default board height in cells
pub const BOARD_HEIGHT: usize = 20;

/// Number of shapes in the shape table
pub const SHAPE_COUNT: u8 = 5;

/// Number of piece colors (color ids are `1..=COLOR_COUNT`)
pub const COLOR_COUNT: u8 = 8;

/// Default gravity interval in milliseconds
pub const GRAVITY_MS: u64 = 400;

/// Raw input byte that always quits (Ctrl-C in raw mode)
pub const QUIT_BYTE: u8 = 3;

/// Line clear scoring, indexed by rows cleared in one lock
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Grid cell (0 = empty, 1..=8 = color id)
pub type Cell = u8;

/// Empty grid cell
pub const EMPTY: Cell = 0;

/// Semantic game actions produced by the input translator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    Pause,
}

impl GameAction {
    /// All actions, in key-binding file order
    pub const ALL: [GameAction; 7] = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::RotateCw,
        GameAction::RotateCcw,
        GameAction::Pause,
    ];

    /// Parse action from its name (case-insensitive)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "pause" => Some(GameAction::Pause),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Pause => "pause",
        }
    }

    /// Whether the action moves or rotates the active piece (and so needs a redraw)
    pub fn is_piece_action(&self) -> bool {
        !matches!(self, GameAction::Pause)
    }
}

/// Rotation direction for the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

impl RotateDirection {
    /// The opposite direction
    pub fn reverse(&self) -> Self {
        match self {
            RotateDirection::Clockwise => RotateDirection::CounterClockwise,
            RotateDirection::CounterClockwise => RotateDirection::Clockwise,
        }
    }

    /// Number of clockwise quarter turns this direction amounts to
    pub fn quarter_turns(&self) -> u8 {
        match self {
            RotateDirection::Clockwise => 1,
            RotateDirection::CounterClockwise => 3,
        }
    }
}
