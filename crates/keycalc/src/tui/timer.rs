//! One-shot timer that clears an error message after a delay
//!
//! The timer never reads the clock itself: callers pass `now`, which keeps
//! the event loop in charge of time and the tests deterministic.

use std::time::{Duration, Instant};

/// Default time an error stays on the display
pub const DEFAULT_ERROR_DISPLAY: Duration = Duration::from_millis(1500);

/// Cancellable error-recovery timer
#[derive(Debug, Clone)]
pub struct ErrorTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Default for ErrorTimer {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_DISPLAY)
    }
}

impl ErrorTimer {
    /// Creates a disarmed timer with the given delay
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Returns the configured delay
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Arms the timer unless it is already running.
    ///
    /// A second error while the first is still shown does not extend
    /// the deadline.
    pub fn arm(&mut self, now: Instant) {
        if self.deadline.is_none() {
            self.deadline = Some(now + self.delay);
        }
    }

    /// Disarms the timer
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns true while a deadline is pending
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true once, when the deadline has passed, and disarms
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Time left until the deadline, or `None` when disarmed
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}
