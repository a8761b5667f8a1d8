//! Terminal rasterizer.
//!
//! A small, game-oriented rendering layer: drawables are integer matrices
//! mapped through a texture, composited into a [`Screen`], and flushed to the
//! terminal in one write per frame.
//!
//! - [`fb`]: the `Screen` cell buffer and its styles
//! - [`object`]: `Object`, `Texture` and `Glyph`
//! - [`palette`]: the eight block colors
//! - [`game_view`]: lays a `GameState` out on a `Screen` (pure, no I/O)
//! - [`renderer`]: escape encoding and terminal mode handling

pub mod fb;
pub mod game_view;
pub mod object;
pub mod palette;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, DrawError, Rgb, Screen};
pub use game_view::GameView;
pub use object::{Glyph, Object, Texture};
pub use palette::Palette;
pub use renderer::{encode_frame_into, TerminalRenderer};
