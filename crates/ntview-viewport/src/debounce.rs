//! Trailing-edge debounce as an explicit state machine.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    Pending { deadline: Instant },
}

/// Runs an action only after `delay` has passed with no new trigger.
///
/// Every [`trigger`](Self::trigger) pushes the deadline out again, so a
/// steady stream of triggers postpones the action indefinitely.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    state: DebounceState,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: DebounceState::Idle,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn state(&self) -> DebounceState {
        self.state
    }

    pub fn trigger(&mut self, now: Instant) {
        self.state = DebounceState::Pending {
            deadline: now + self.delay,
        };
    }

    /// Returns true exactly once per quiet period, when the deadline has
    /// been reached, and goes back to idle.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            DebounceState::Pending { deadline } if now >= deadline => {
                self.state = DebounceState::Idle;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.state = DebounceState::Idle;
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            DebounceState::Pending { deadline } => Some(deadline),
            DebounceState::Idle => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, DebounceState::Pending { .. })
    }
}
