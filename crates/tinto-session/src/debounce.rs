//! Single-slot delayed task.

use std::time::{Duration, Instant};

/// Coalesces bursts of requests into the most recent one.
///
/// Arming while a task is pending cancels and replaces it — there is
/// never a queue, only the latest request and its deadline. The clock
/// is passed in explicitly so scheduling stays deterministic.
#[derive(Debug)]
pub struct Debounce<T> {
    window: Duration,
    deadline: Option<Instant>,
    pending: Option<T>,
}

impl<T> Debounce<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
            pending: None,
        }
    }

    /// Schedule `task` to fire one window from `now`, replacing any
    /// pending task and restarting the countdown.
    pub fn arm(&mut self, now: Instant, task: T) {
        self.deadline = Some(now + self.window);
        self.pending = Some(task);
    }

    /// Take the pending task if its deadline has passed. Fires at most
    /// once per arm.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    /// Drop the pending task without firing it.
    pub fn cancel(&mut self) {
        self.deadline = None;
        self.pending = None;
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}
