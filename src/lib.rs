//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one name and holds the app-level
//! pieces shared by the binaries: environment configuration and the event log.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod config;
pub mod event_log;

pub use config::AppConfig;
pub use event_log::{EventLog, LogEvent};
