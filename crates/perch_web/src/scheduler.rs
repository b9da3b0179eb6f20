//! `setTimeout`-backed timer collaborator.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::Timeout;
use perch_core::{Deferral, Scheduler, TimerToken};

/// Longest delay `setTimeout` honours; larger values fire immediately.
pub const MAX_TIMEOUT_MS: u32 = i32::MAX as u32;

/// Convert a delay to `setTimeout` milliseconds, saturating at
/// [`MAX_TIMEOUT_MS`].
pub fn timeout_millis(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).map_or(MAX_TIMEOUT_MS, |ms| ms.min(MAX_TIMEOUT_MS))
}

/// Callback receiving elapsed tokens, installed once the service exists.
pub(crate) type Sink = Rc<RefCell<Option<Box<dyn Fn(TimerToken)>>>>;

/// Schedules tokens on the browser event loop.
///
/// A next-frame deferral is a zero-delay timeout, which runs after the
/// current task has finished and layout has been flushed.
pub struct BrowserScheduler {
    sink: Sink,
    pending: HashMap<TimerToken, Timeout>,
    finished: Rc<RefCell<Vec<TimerToken>>>,
}

impl BrowserScheduler {
    /// Create a scheduler with no sink installed yet.
    pub fn new() -> Self {
        Self {
            sink: Rc::new(RefCell::new(None)),
            pending: HashMap::new(),
            finished: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub(crate) fn sink(&self) -> Sink {
        self.sink.clone()
    }

    /// Drop timeouts whose callbacks already returned.
    fn collect(&mut self) {
        for token in self.finished.borrow_mut().drain(..) {
            self.pending.remove(&token);
        }
    }
}

impl Default for BrowserScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule(&mut self, token: TimerToken, when: Deferral) {
        self.collect();

        let millis = match when {
            Deferral::NextFrame => 0,
            Deferral::After(delay) => timeout_millis(delay),
        };
        let sink = self.sink.clone();
        let finished = self.finished.clone();
        let timeout = Timeout::new(millis, move || {
            if let Some(sink) = sink.borrow().as_ref() {
                sink(token);
            }
            // Only reclaimed after returning; the callback must outlive its own run
            finished.borrow_mut().push(token);
        });
        self.pending.insert(token, timeout);
    }

    fn cancel(&mut self, token: TimerToken) {
        self.collect();
        // Dropping a gloo Timeout clears it
        self.pending.remove(&token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_millis_saturates() {
        assert_eq!(timeout_millis(Duration::from_millis(250)), 250);
        assert_eq!(timeout_millis(Duration::from_millis(u64::from(MAX_TIMEOUT_MS))), MAX_TIMEOUT_MS);
        assert_eq!(timeout_millis(Duration::from_millis(u64::from(u32::MAX))), MAX_TIMEOUT_MS);
        assert_eq!(timeout_millis(Duration::from_secs(u64::MAX)), MAX_TIMEOUT_MS);
    }
}
