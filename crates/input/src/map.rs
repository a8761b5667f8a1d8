//! Byte-to-action translation.
//!
//! One raw byte per keypress. Byte 3 (Ctrl-C in raw mode) always quits,
//! whatever the bindings say.

use crate::bindings::{ConfigError, KeyBindings};
use crate::types::{GameAction, QUIT_BYTE};

/// What a single input byte asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Quit,
    Action(GameAction),
}

/// Lookup table from raw bytes to commands, built once from the bindings
#[derive(Debug, Clone)]
pub struct InputTranslator {
    table: [Option<GameAction>; 256],
}

impl InputTranslator {
    pub fn new(bindings: &KeyBindings) -> Result<Self, ConfigError> {
        let mut table = [None; 256];
        for (action, byte) in bindings.resolve()? {
            table[byte as usize] = Some(action);
        }
        Ok(Self { table })
    }

    /// Translate one byte; unbound bytes are ignored
    pub fn translate(&self, byte: u8) -> Option<InputCommand> {
        if should_quit(byte) {
            return Some(InputCommand::Quit);
        }
        self.table[byte as usize].map(InputCommand::Action)
    }
}

impl Default for InputTranslator {
    fn default() -> Self {
        // The default bindings are distinct and never claim the quit byte,
        // so `new` cannot reject them.
        Self::new(&KeyBindings::default()).unwrap_or_else(|_| Self { table: [None; 256] })
    }
}

/// Check if a byte should quit the game.
pub fn should_quit(byte: u8) -> bool {
    byte == QUIT_BYTE
}
