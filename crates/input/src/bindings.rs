//! Declarative key-binding table.
//!
//! Bindings are loaded once at startup from JSON. Each action name maps to a
//! key, written either as a one-character string or as a raw byte value:
//!
//! ```json
//! { "moveLeft": "a", "moveRight": "d", "hardDrop": " ", "pause": 27 }
//! ```
//!
//! Missing entries keep their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{GameAction, QUIT_BYTE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read key bindings from {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid key binding file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("key {key:?} for {action} is not a single-byte ASCII character")]
    NotAscii { action: &'static str, key: char },
    #[error("byte 3 is reserved for quit and cannot be bound to {action}")]
    ReservedQuit { action: &'static str },
    #[error("byte {byte} is bound to both {first} and {second}")]
    Duplicate {
        byte: u8,
        first: &'static str,
        second: &'static str,
    },
}

/// A key, as written in the binding file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Byte(u8),
    Char(char),
}

impl Key {
    fn byte(self, action: GameAction) -> Result<u8, ConfigError> {
        match self {
            Key::Byte(b) => Ok(b),
            Key::Char(ch) if ch.is_ascii() => Ok(ch as u8),
            Key::Char(ch) => Err(ConfigError::NotAscii {
                action: action.as_str(),
                key: ch,
            }),
        }
    }
}

/// Key for each game action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct KeyBindings {
    pub move_left: Key,
    pub move_right: Key,
    pub soft_drop: Key,
    pub hard_drop: Key,
    pub rotate_cw: Key,
    pub rotate_ccw: Key,
    pub pause: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: Key::Char('a'),
            move_right: Key::Char('d'),
            soft_drop: Key::Char('s'),
            hard_drop: Key::Char(' '),
            rotate_cw: Key::Char('w'),
            rotate_ccw: Key::Char('z'),
            pause: Key::Char('p'),
        }
    }
}

impl KeyBindings {
    /// Load and validate bindings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse and validate bindings from JSON text
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let bindings: Self = serde_json::from_str(text)?;
        bindings.resolve()?;
        Ok(bindings)
    }

    pub fn key(&self, action: GameAction) -> Key {
        match action {
            GameAction::MoveLeft => self.move_left,
            GameAction::MoveRight => self.move_right,
            GameAction::SoftDrop => self.soft_drop,
            GameAction::HardDrop => self.hard_drop,
            GameAction::RotateCw => self.rotate_cw,
            GameAction::RotateCcw => self.rotate_ccw,
            GameAction::Pause => self.pause,
        }
    }

    /// Resolve every action to its byte, rejecting reserved and duplicate bytes
    pub fn resolve(&self) -> Result<[(GameAction, u8); 7], ConfigError> {
        let mut out = [(GameAction::MoveLeft, 0u8); 7];

        for (i, action) in GameAction::ALL.into_iter().enumerate() {
            let byte = self.key(action).byte(action)?;
            if byte == QUIT_BYTE {
                return Err(ConfigError::ReservedQuit {
                    action: action.as_str(),
                });
            }
            if let Some(&(first, _)) = out[..i].iter().find(|&&(_, b)| b == byte) {
                return Err(ConfigError::Duplicate {
                    byte,
                    first: first.as_str(),
                    second: action.as_str(),
                });
            }
            out[i] = (action, byte);
        }

        Ok(out)
    }
}
