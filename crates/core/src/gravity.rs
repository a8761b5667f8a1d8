//! Gravity clock - decides when the next gravity tick is due
//!
//! The clock is driven by explicit `Instant`s so it can be tested without
//! sleeping. At most one tick is reported per poll, and a late poll restarts
//! the interval from that poll; missed intervals never turn into a burst.
//!
//! Time spent paused is discarded: `resume` restarts the interval.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct GravityClock {
    interval: Duration,
    last_tick: Instant,
    paused_at: Option<Instant>,
}

impl GravityClock {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_tick: now,
            paused_at: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Returns true if a gravity tick is due, and restarts the interval if so.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.is_paused() {
            return false;
        }
        if now.saturating_duration_since(self.last_tick) >= self.interval {
            self.last_tick = now;
            return true;
        }
        false
    }

    /// Time left until the next tick (zero if due, the full interval while paused)
    pub fn remaining(&self, now: Instant) -> Duration {
        if self.is_paused() {
            return self.interval;
        }
        self.interval
            .saturating_sub(now.saturating_duration_since(self.last_tick))
    }

    pub fn pause(&mut self, now: Instant) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    pub fn resume(&mut self, now: Instant) {
        if self.paused_at.take().is_some() {
            self.last_tick = now;
        }
    }

    /// Flip between paused and running; returns true if now paused
    pub fn toggle_pause(&mut self, now: Instant) -> bool {
        if self.is_paused() {
            self.resume(now);
        } else {
            self.pause(now);
        }
        self.is_paused()
    }

    /// Restart the interval from `now`
    pub fn reset(&mut self, now: Instant) {
        self.last_tick = now;
    }
}
