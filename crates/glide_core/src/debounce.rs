//! Debounced triggers
//!
//! [`Debouncer`] is the building block: it cooperates with a caller-owned
//! [`TimerQueue`] so widgets can keep every deferred task in one queue.
//! [`Debounced`] bundles a debouncer, its own queue and a callback for
//! standalone use.

use std::time::Duration;

use crate::time::Timestamp;
use crate::timer::{TimerId, TimerQueue};

/// Which edge of a burst invokes the callback
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DebounceEdge {
    /// Fire once, `wait` after the last call of a burst, with the last
    /// call's arguments.
    #[default]
    Trailing,
    /// Fire synchronously on the first call of a burst and suppress every
    /// call until `wait` passes without one.
    Leading,
}

/// Pull-based debouncer.
///
/// Each [`call`](Debouncer::call) cancels the pending timer and schedules a
/// fresh one `wait` later. When the owner's queue expires that timer, it hands
/// the id to [`fire`](Debouncer::fire), which yields the arguments to run
/// with (if any).
#[derive(Debug)]
pub struct Debouncer<A> {
    wait: Duration,
    edge: DebounceEdge,
    pending: Option<TimerId>,
    latest: Option<A>,
}

impl<A> Debouncer<A> {
    /// Trailing-edge debouncer.
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            edge: DebounceEdge::Trailing,
            pending: None,
            latest: None,
        }
    }

    /// Leading-edge debouncer ("fire immediately, suppress the rest").
    pub fn leading(wait: Duration) -> Self {
        Self {
            edge: DebounceEdge::Leading,
            ..Self::new(wait)
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    pub fn edge(&self) -> DebounceEdge {
        self.edge
    }

    /// Whether a quiet-period timer is running
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Timer that will end the current quiet period.
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.pending
    }

    /// Register an invocation.
    ///
    /// `task` is what the queue hands back when the quiet period ends.
    /// Returns the arguments to run with *now*, which only happens for the
    /// first call of a burst in leading mode.
    pub fn call<T>(&mut self, timers: &mut TimerQueue<T>, args: A, task: T) -> Option<A> {
        let call_now = self.edge == DebounceEdge::Leading && self.pending.is_none();

        if let Some(id) = self.pending.take() {
            timers.clear_timeout(id);
        }
        self.pending = Some(timers.set_timeout(self.wait, task));

        match self.edge {
            DebounceEdge::Trailing => {
                self.latest = Some(args);
                None
            }
            DebounceEdge::Leading => call_now.then_some(args),
        }
    }

    /// Handle expiry of timer `id`. Returns the arguments for the trailing
    /// invocation, or `None` if the timer is stale or the edge is leading.
    pub fn fire(&mut self, id: TimerId) -> Option<A> {
        if self.pending != Some(id) {
            return None;
        }
        self.pending = None;

        match self.edge {
            DebounceEdge::Trailing => self.latest.take(),
            DebounceEdge::Leading => None,
        }
    }

    /// Drop the pending invocation without running it.
    pub fn cancel<T>(&mut self, timers: &mut TimerQueue<T>) {
        if let Some(id) = self.pending.take() {
            timers.clear_timeout(id);
        }
        self.latest = None;
    }
}

/// A callback wrapped in a debouncer with its own timer queue.
pub struct Debounced<A, F>
where
    F: FnMut(A),
{
    debouncer: Debouncer<A>,
    timers: TimerQueue<()>,
    callback: F,
}

impl<A, F> Debounced<A, F>
where
    F: FnMut(A),
{
    /// Trailing-edge wrapper around `callback`.
    pub fn new(wait: Duration, callback: F) -> Self {
        Self {
            debouncer: Debouncer::new(wait),
            timers: TimerQueue::new(),
            callback,
        }
    }

    /// Leading-edge wrapper around `callback`.
    pub fn leading(wait: Duration, callback: F) -> Self {
        Self {
            debouncer: Debouncer::leading(wait),
            timers: TimerQueue::new(),
            callback,
        }
    }

    /// Invoke the wrapper at time `now`.
    pub fn call(&mut self, now: Timestamp, args: A) {
        self.advance_to(now);
        if let Some(args) = self.debouncer.call(&mut self.timers, args, ()) {
            (self.callback)(args);
        }
    }

    /// Run the callback if the quiet period ended at or before `now`.
    pub fn advance_to(&mut self, now: Timestamp) {
        while let Some(expired) = self.timers.pop_due(now) {
            if let Some(args) = self.debouncer.fire(expired.id) {
                (self.callback)(args);
            }
        }
        self.timers.advance(now);
    }

    /// When the pending quiet period ends
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.timers.next_deadline()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Forget the pending invocation.
    pub fn cancel(&mut self) {
        self.debouncer.cancel(&mut self.timers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn ms(millis: u64) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    #[test]
    fn test_trailing_burst_fires_once_with_last_args() {
        let calls = RefCell::new(Vec::new());
        let mut debounced = Debounced::new(Duration::from_millis(100), |n: u32| {
            calls.borrow_mut().push(n)
        });

        for (i, t) in [0, 30, 60, 90, 120].into_iter().enumerate() {
            debounced.call(ms(t), i as u32);
        }

        // Quiet period counts from the last call (t=120)
        debounced.advance_to(ms(219));
        assert!(calls.borrow().is_empty());
        assert_eq!(debounced.next_deadline(), Some(ms(220)));

        debounced.advance_to(ms(220));
        assert_eq!(*calls.borrow(), vec![4]);

        debounced.advance_to(ms(1_000));
        assert_eq!(calls.borrow().len(), 1);
        assert!(!debounced.is_pending());
    }

    #[test]
    fn test_trailing_separate_bursts() {
        let calls = RefCell::new(Vec::new());
        let mut debounced = Debounced::new(Duration::from_millis(50), |n: u32| {
            calls.borrow_mut().push(n)
        });

        debounced.call(ms(0), 1);
        debounced.call(ms(200), 2);
        debounced.advance_to(ms(400));

        assert_eq!(*calls.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_leading_fires_first_and_suppresses_rest() {
        let calls = RefCell::new(Vec::new());
        let mut debounced = Debounced::leading(Duration::from_millis(100), |n: u32| {
            calls.borrow_mut().push(n)
        });
        assert_eq!(debounced.debouncer.edge(), DebounceEdge::Leading);

        debounced.call(ms(0), 1);
        assert_eq!(*calls.borrow(), vec![1]);

        debounced.call(ms(50), 2);
        debounced.call(ms(120), 3);
        debounced.advance_to(ms(500));
        assert_eq!(*calls.borrow(), vec![1]);

        // Window closed at 220, next call fires immediately again
        debounced.call(ms(600), 4);
        assert_eq!(*calls.borrow(), vec![1, 4]);
    }

    #[test]
    fn test_cancel_drops_pending_call() {
        let calls = RefCell::new(Vec::new());
        let mut debounced = Debounced::new(Duration::from_millis(10), |n: u32| {
            calls.borrow_mut().push(n)
        });

        debounced.call(ms(0), 7);
        debounced.cancel();
        debounced.advance_to(ms(100));

        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let mut timers = TimerQueue::new();
        let mut debouncer = Debouncer::new(Duration::from_millis(10));
        assert_eq!(debouncer.edge(), DebounceEdge::Trailing);

        debouncer.call(&mut timers, "a", ());
        let first = debouncer.pending_timer().unwrap();
        debouncer.call(&mut timers, "b", ());

        assert_eq!(debouncer.fire(first), None);
        assert!(!timers.is_pending(first));

        let expired = timers.pop_due(ms(100)).unwrap();
        assert_eq!(debouncer.fire(expired.id), Some("b"));
    }
}
