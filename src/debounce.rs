//! Poll-driven debouncing.
//!
//! There are no background timers: the host calls [`Debouncer::poll`] once per
//! frame (or tick) with the current instant, the same way the UI loop polls
//! for completed work.

use std::time::{Duration, Instant};

/// Coalesces a burst of triggers into one firing after a quiet window.
///
/// Each trigger replaces the pending deadline, so only the last trigger of a
/// burst counts.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedules (or reschedules) the firing at `now + window`.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// Drops a pending firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` exactly once when the pending deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
