//! Terminal input module (engine-facing).
//!
//! Raw bytes come in from a capture thread through [`InputQueue`], and
//! [`InputTranslator`] turns them into [`crate::types::GameAction`]s using the
//! [`KeyBindings`] loaded at startup.

pub mod bindings;
pub mod map;
pub mod queue;

pub use blockfall_types as types;

pub use bindings::{ConfigError, Key, KeyBindings};
pub use map::{should_quit, InputCommand, InputTranslator};
pub use queue::InputQueue;
