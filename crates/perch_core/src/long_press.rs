//! Long-press detection.
//!
//! A press counts once the pointer has stayed down for the threshold. The
//! detector only tracks state; the owner arms a timer on
//! [`PressStep::Arm`], cancels it on [`PressStep::Disarm`] and reports the
//! elapsed timer through [`LongPressDetector::elapsed`].

use std::time::Duration;

use crate::timers::TimerToken;

/// What the owner must do with the press timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressStep {
    /// Start a timer for this long
    Arm(Duration),
    /// Cancel this pending timer
    Disarm(TimerToken),
    /// Nothing to do
    Idle,
}

/// Per-element long-press state.
#[derive(Debug, Clone)]
pub struct LongPressDetector {
    threshold: Duration,
    pending: Option<TimerToken>,
    emitted: u32,
}

impl LongPressDetector {
    /// Create a detector with the given threshold.
    pub fn new(threshold: Duration) -> Self {
        Self { threshold, pending: None, emitted: 0 }
    }

    /// Press threshold.
    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Number of long presses detected so far.
    pub fn emitted(&self) -> u32 {
        self.emitted
    }

    /// Whether a press is being timed.
    pub fn is_pressed(&self) -> bool {
        self.pending.is_some()
    }

    /// Pointer went down. A second down while pressed restarts the timer.
    pub fn press(&mut self) -> (Option<TimerToken>, PressStep) {
        (self.pending.take(), PressStep::Arm(self.threshold))
    }

    /// Record the token of the timer armed for the current press.
    pub fn armed(&mut self, token: TimerToken) {
        self.pending = Some(token);
    }

    /// Pointer released or cancelled.
    pub fn release(&mut self) -> PressStep {
        match self.pending.take() {
            Some(token) => PressStep::Disarm(token),
            None => PressStep::Idle,
        }
    }

    /// The press timer fired. `true` when it belongs to the current press,
    /// i.e. a long press happened.
    pub fn elapsed(&mut self, token: TimerToken) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            self.emitted += 1;
            true
        } else {
            false
        }
    }
}
