//! Input capture thread and the queue it feeds.
//!
//! A dedicated thread blocks on one-byte reads and sends each byte down an
//! mpsc channel. The game loop pops from the other end without blocking, so
//! every byte is delivered exactly once and in order.

use std::io::{self, Read};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

/// Receiving end of the input capture thread
#[derive(Debug)]
pub struct InputQueue {
    rx: Receiver<u8>,
}

impl InputQueue {
    /// Start a capture thread reading one byte at a time from `reader`.
    ///
    /// The thread ends on EOF, on a read error, or once the queue is dropped
    /// and the next byte arrives.
    pub fn spawn<R>(reader: R) -> io::Result<Self>
    where
        R: Read + Send + 'static,
    {
        let (tx, queue) = Self::channel();
        thread::Builder::new()
            .name("input".to_string())
            .spawn(move || capture(reader, tx))?;
        Ok(queue)
    }

    /// Capture from standard input
    pub fn stdin() -> io::Result<Self> {
        Self::spawn(io::stdin())
    }

    /// A queue fed by hand, for tests and replays
    pub fn channel() -> (Sender<u8>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self { rx })
    }

    /// Pop the oldest byte without blocking
    pub fn try_pop(&self) -> Option<u8> {
        match self.rx.try_recv() {
            Ok(byte) => Some(byte),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Pop the oldest byte, waiting at most `timeout` for one to arrive
    pub fn pop_timeout(&self, timeout: Duration) -> Option<u8> {
        match self.rx.recv_timeout(timeout) {
            Ok(byte) => Some(byte),
            Err(RecvTimeoutError::Timeout) => None,
            // The capture thread is gone; don't spin on a dead channel.
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(timeout);
                None
            }
        }
    }
}

fn capture<R: Read>(mut reader: R, tx: Sender<u8>) {
    let mut buf = [0u8; 1];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(_) => {
                if tx.send(buf[0]).is_err() {
                    break;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(_) => break,
        }
    }
}
