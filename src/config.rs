//! Runtime configuration from environment variables.
//!
//! | Variable              | Meaning                               | Default        |
//! |-----------------------|---------------------------------------|----------------|
//! | `BLOCKFALL_KEYS`      | path to a key-binding JSON file       | built-in keys  |
//! | `BLOCKFALL_GRAVITY_MS`| gravity interval in milliseconds      | 400            |
//! | `BLOCKFALL_SEED`      | piece generator seed                  | wall clock     |
//! | `BLOCKFALL_LOG_PATH`  | JSON-lines event log file             | no log         |
//!
//! Unset, empty or unparsable values fall back to the default.

use std::env;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::input::{ConfigError, KeyBindings};
use crate::types::GRAVITY_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub keys_path: Option<PathBuf>,
    pub gravity: Duration,
    pub seed: Option<u32>,
    pub log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            keys_path: None,
            gravity: Duration::from_millis(GRAVITY_MS),
            seed: None,
            log_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let gravity = get("BLOCKFALL_GRAVITY_MS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(GRAVITY_MS));

        Self {
            keys_path: get("BLOCKFALL_KEYS").map(PathBuf::from),
            gravity,
            seed: get("BLOCKFALL_SEED").and_then(|s| s.parse().ok()),
            log_path: get("BLOCKFALL_LOG_PATH").map(PathBuf::from),
        }
    }

    /// The configured seed, or one taken from the wall clock
    pub fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
                .unwrap_or(1)
        })
    }

    /// Load the key bindings file if one is configured
    pub fn key_bindings(&self) -> Result<KeyBindings, ConfigError> {
        match &self.keys_path {
            Some(path) => KeyBindings::load(path),
            None => Ok(KeyBindings::default()),
        }
    }
}
