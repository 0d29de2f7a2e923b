use std::time::{Duration, Instant};

/// Coalesces a stream of inputs into a single committed value: each input
/// replaces the pending value and restarts the delay; `poll` yields the
/// latest value once the delay has elapsed without further input.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record an input, resetting the pending deadline.
    pub fn input(&mut self, value: impl Into<String>) {
        self.pending = Some((value.into(), Instant::now()));
    }

    /// Commit the pending value if its delay has elapsed.
    pub fn poll(&mut self) -> Option<String> {
        match &self.pending {
            Some((_, since)) if since.elapsed() >= self.delay => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Commit the pending value immediately, skipping the remaining delay.
    /// Used when the user clears the field or presses enter.
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
