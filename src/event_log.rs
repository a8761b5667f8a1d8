//! JSON-lines event log.
//!
//! The terminal is in raw mode while the game runs, so diagnostics go to a
//! file instead. Each record is one JSON object per line:
//!
//! ```text
//! {"t_ms":0,"event":"start","seed":42,"width":10,"height":20,"gravity_ms":400}
//! {"t_ms":5120,"event":"lock","rows_cleared":1,"points":40,"score":40,"lines":1}
//! ```
//!
//! Write failures disable the log; they never reach the game.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent {
    Start {
        seed: u32,
        width: usize,
        height: usize,
        gravity_ms: u64,
    },
    Lock {
        rows_cleared: usize,
        points: u32,
        score: u32,
        lines: u32,
    },
    GameOver {
        score: u32,
        lines: u32,
        pieces: u32,
    },
    Quit {
        score: u32,
        lines: u32,
    },
}

#[derive(Serialize)]
struct Record<'a> {
    t_ms: u64,
    #[serde(flatten)]
    event: &'a LogEvent,
}

pub struct EventLog {
    file: Option<BufWriter<File>>,
    started: Instant,
    buf: Vec<u8>,
}

impl EventLog {
    /// A log that drops everything
    pub fn disabled() -> Self {
        Self {
            file: None,
            started: Instant::now(),
            buf: Vec::new(),
        }
    }

    /// Append to `path`, or a disabled log if `path` is `None` or cannot be opened.
    pub fn open(path: Option<&Path>) -> Self {
        let file = path.and_then(|p| OpenOptions::new().create(true).append(true).open(p).ok());
        Self {
            file: file.map(BufWriter::new),
            started: Instant::now(),
            buf: Vec::with_capacity(256),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    pub fn record(&mut self, event: &LogEvent) {
        let Some(file) = self.file.as_mut() else {
            return;
        };

        let record = Record {
            t_ms: self.started.elapsed().as_millis() as u64,
            event,
        };
        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, &record).is_err() {
            return;
        }
        self.buf.push(b'\n');

        if file.write_all(&self.buf).and_then(|_| file.flush()).is_err() {
            self.file = None;
        }
    }
}
