//! Timer collaborator.
//!
//! Perch never sleeps or spawns. Every deferral (next paint, show delay,
//! leave animation, long press) is handed to a [`Scheduler`] under a
//! [`TimerToken`]; the host calls back into the service with that token when
//! it elapses. Tokens are allocated by [`TimerTable`], which also remembers
//! what each pending token is for so stale or cancelled ones are ignored.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;

/// Length of one paint frame on the manual clock.
pub const FRAME: Duration = Duration::from_millis(16);

/// Identifier of one scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub(crate) u64);

impl TimerToken {
    /// Raw value, for hosts that key their own tables by it.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// When a scheduled token should fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferral {
    /// After the host's next layout/paint pass
    NextFrame,
    /// After a fixed delay
    After(Duration),
}

/// Host timer primitive.
pub trait Scheduler {
    /// Arrange for `token` to be delivered back once `when` elapses.
    fn schedule(&mut self, token: TimerToken, when: Deferral);

    /// Drop a pending token. Unknown tokens are ignored.
    fn cancel(&mut self, token: TimerToken);
}

/// Pending tokens and what they were scheduled for.
#[derive(Debug)]
pub struct TimerTable<P> {
    next: u64,
    pending: HashMap<TimerToken, P>,
}

impl<P: Copy + fmt::Debug> TimerTable<P> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self { next: 0, pending: HashMap::new() }
    }

    /// Allocate a token for `purpose` and hand it to `scheduler`.
    pub fn arm(&mut self, scheduler: &mut dyn Scheduler, purpose: P, when: Deferral) -> TimerToken {
        self.next += 1;
        let token = TimerToken(self.next);
        self.pending.insert(token, purpose);
        scheduler.schedule(token, when);
        tracing::trace!(%token, ?purpose, ?when, "Timer armed");
        token
    }

    /// Resolve a fired token. `None` for cancelled or unknown tokens.
    pub fn take(&mut self, token: TimerToken) -> Option<P> {
        self.pending.remove(&token)
    }

    /// Cancel one token if it is still pending.
    pub fn cancel(&mut self, scheduler: &mut dyn Scheduler, token: TimerToken) -> bool {
        if self.pending.remove(&token).is_some() {
            scheduler.cancel(token);
            tracing::trace!(%token, "Timer cancelled");
            true
        } else {
            false
        }
    }

    /// Cancel every pending token whose purpose matches.
    pub fn cancel_where(
        &mut self,
        scheduler: &mut dyn Scheduler,
        mut matches: impl FnMut(&P) -> bool,
    ) -> usize {
        let tokens: Vec<TimerToken> =
            self.pending.iter().filter(|(_, p)| matches(p)).map(|(t, _)| *t).collect();
        for token in &tokens {
            self.pending.remove(token);
            scheduler.cancel(*token);
        }
        if !tokens.is_empty() {
            tracing::trace!(count = tokens.len(), "Timers cancelled");
        }
        tokens.len()
    }

    /// Number of pending tokens.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<P: Copy + fmt::Debug> Default for TimerTable<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Scheduler driven by an explicit virtual clock.
///
/// Nothing fires on its own; the owner pops due tokens with
/// [`ManualScheduler::pop_due`]. Used by tests and by hosts that run their
/// own frame loop.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    seq: u64,
    queue: BTreeMap<(Duration, u64), TimerToken>,
}

impl ManualScheduler {
    /// Create a scheduler at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of queued tokens.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Remove the earliest token due at or before `until` and move the clock
    /// to its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerToken> {
        let (&key, _) = self.queue.first_key_value()?;
        if key.0 > until {
            return None;
        }
        let token = self.queue.remove(&key)?;
        self.now = self.now.max(key.0);
        Some(token)
    }

    /// Move the clock forward without firing anything.
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, token: TimerToken, when: Deferral) {
        let delay = match when {
            Deferral::NextFrame => FRAME,
            Deferral::After(delay) => delay,
        };
        self.seq += 1;
        self.queue.insert((self.now + delay, self.seq), token);
    }

    fn cancel(&mut self, token: TimerToken) {
        self.queue.retain(|_, t| *t != token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Purpose {
        A,
        B,
    }

    #[test]
    fn test_arm_and_take() {
        let mut scheduler = ManualScheduler::new();
        let mut table = TimerTable::new();

        let token = table.arm(&mut scheduler, Purpose::A, Deferral::NextFrame);
        assert_eq!(table.len(), 1);
        assert_eq!(scheduler.pending(), 1);

        assert_eq!(scheduler.pop_due(Duration::ZERO), None);
        assert_eq!(scheduler.pop_due(FRAME), Some(token));
        assert_eq!(scheduler.now(), FRAME);

        assert_eq!(table.take(token), Some(Purpose::A));
        assert_eq!(table.take(token), None);
    }

    #[test]
    fn test_cancel_removes_from_scheduler() {
        let mut scheduler = ManualScheduler::new();
        let mut table = TimerTable::new();

        let token = table.arm(&mut scheduler, Purpose::A, Deferral::After(Duration::from_millis(50)));
        assert!(table.cancel(&mut scheduler, token));
        assert!(!table.cancel(&mut scheduler, token));
        assert_eq!(scheduler.pending(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_cancel_where() {
        let mut scheduler = ManualScheduler::new();
        let mut table = TimerTable::new();

        table.arm(&mut scheduler, Purpose::A, Deferral::NextFrame);
        table.arm(&mut scheduler, Purpose::B, Deferral::NextFrame);
        table.arm(&mut scheduler, Purpose::A, Deferral::After(Duration::from_secs(1)));

        assert_eq!(table.cancel_where(&mut scheduler, |p| *p == Purpose::A), 2);
        assert_eq!(table.len(), 1);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_pop_due_in_deadline_order() {
        let mut scheduler = ManualScheduler::new();
        let mut table = TimerTable::new();

        let late = table.arm(&mut scheduler, Purpose::A, Deferral::After(Duration::from_millis(200)));
        let early = table.arm(&mut scheduler, Purpose::B, Deferral::After(Duration::from_millis(100)));

        let until = Duration::from_millis(500);
        assert_eq!(scheduler.pop_due(until), Some(early));
        assert_eq!(scheduler.pop_due(until), Some(late));
        assert_eq!(scheduler.pop_due(until), None);
        assert_eq!(scheduler.now(), Duration::from_millis(200));
    }
}
