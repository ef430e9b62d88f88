//! Cooperative playback timer.
//!
//! Nothing runs in the background: the host polls with the current time and
//! the timer says whether the next step is due. Disarming is therefore
//! immediate; a disarmed timer never reports a step as due.

use std::time::{Duration, Instant};

/// Fixed-interval deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackTimer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl PlaybackTimer {
    /// A disarmed timer with the given interval.
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// Time between steps.
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the interval. An armed timer keeps its current deadline.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Schedule the first step one interval after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    /// Cancel the pending deadline.
    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the next step is due, if armed.
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// True if a step is due at `now`. A due timer re-arms itself one
    /// interval after `now`, so a late poll fires once rather than catching
    /// up on missed intervals.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}
