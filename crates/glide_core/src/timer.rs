//! Timer queue
//!
//! Deferred callbacks for the cooperative event loop. Tasks are plain values
//! (usually an enum owned by the widget), so firing a timer never needs to
//! borrow the widget from inside a closure.
//!
//! The queue keeps its own notion of "now", which only moves forward when the
//! owner pumps it with [`TimerQueue::pop_due`] or [`TimerQueue::advance`].

use std::collections::BTreeMap;
use std::time::Duration;

use slotmap::{new_key_type, SlotMap};

use crate::time::Timestamp;

new_key_type! {
    /// Handle returned by [`TimerQueue::set_timeout`], used to cancel a timer
    pub struct TimerId;
}

struct Pending<T> {
    at: Timestamp,
    seq: u64,
    task: T,
}

/// A timer that reached its deadline.
#[derive(Debug)]
pub struct Expired<T> {
    pub id: TimerId,
    pub at: Timestamp,
    pub task: T,
}

/// Deadline-ordered queue of deferred tasks.
///
/// Timers with equal deadlines fire in the order they were scheduled.
pub struct TimerQueue<T> {
    now: Timestamp,
    timers: SlotMap<TimerId, Pending<T>>,
    order: BTreeMap<(Timestamp, u64), TimerId>,
    next_seq: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: Timestamp::ZERO,
            timers: SlotMap::with_key(),
            order: BTreeMap::new(),
            next_seq: 0,
        }
    }

    /// Current virtual time of the queue.
    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Move the clock forward. Never moves backwards.
    pub fn advance(&mut self, now: Timestamp) {
        self.now = self.now.max(now);
    }

    /// Schedule `task` to run `delay` after the current time.
    pub fn set_timeout(&mut self, delay: Duration, task: T) -> TimerId {
        self.schedule_at(self.now + delay, task)
    }

    /// Schedule `task` at an absolute deadline. Deadlines in the past are
    /// due immediately.
    pub fn schedule_at(&mut self, at: Timestamp, task: T) -> TimerId {
        let at = at.max(self.now);
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = self.timers.insert(Pending { at, seq, task });
        self.order.insert((at, seq), id);
        id
    }

    /// Cancel a pending timer, returning its task if it had not fired yet.
    pub fn clear_timeout(&mut self, id: TimerId) -> Option<T> {
        let pending = self.timers.remove(id)?;
        self.order.remove(&(pending.at, pending.seq));
        Some(pending.task)
    }

    /// Check whether a timer is still waiting to fire
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.order.keys().next().map(|(at, _)| *at)
    }

    /// Pop the earliest timer whose deadline is at or before `until`.
    ///
    /// The queue clock jumps to the timer's deadline, so work scheduled while
    /// handling it is relative to the moment it fired, not to `until`.
    pub fn pop_due(&mut self, until: Timestamp) -> Option<Expired<T>> {
        let (&(at, seq), _) = self.order.iter().next()?;
        if at > until {
            return None;
        }
        let id = self.order.remove(&(at, seq))?;
        let pending = self.timers.remove(id)?;
        self.advance(at);
        Some(Expired {
            id,
            at,
            task: pending.task,
        })
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.timers.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(queue: &mut TimerQueue<&'static str>, until: Timestamp) -> Vec<&'static str> {
        let mut fired = Vec::new();
        while let Some(expired) = queue.pop_due(until) {
            fired.push(expired.task);
        }
        fired
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut queue = TimerQueue::new();
        queue.set_timeout(Duration::from_millis(30), "late");
        queue.set_timeout(Duration::from_millis(10), "early");
        queue.set_timeout(Duration::from_millis(20), "middle");

        assert_eq!(queue.next_deadline(), Some(Timestamp::from_millis(10)));
        assert_eq!(
            drain(&mut queue, Timestamp::from_millis(100)),
            vec!["early", "middle", "late"]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_equal_deadlines_are_fifo() {
        let mut queue = TimerQueue::new();
        queue.set_timeout(Duration::from_millis(5), "first");
        queue.set_timeout(Duration::from_millis(5), "second");

        assert_eq!(
            drain(&mut queue, Timestamp::from_millis(5)),
            vec!["first", "second"]
        );
    }

    #[test]
    fn test_not_due_yet() {
        let mut queue = TimerQueue::new();
        queue.set_timeout(Duration::from_millis(50), "later");

        assert!(drain(&mut queue, Timestamp::from_millis(49)).is_empty());
        assert_eq!(queue.len(), 1);
        assert_eq!(drain(&mut queue, Timestamp::from_millis(50)), vec!["later"]);
    }

    #[test]
    fn test_clear_timeout() {
        let mut queue = TimerQueue::new();
        let id = queue.set_timeout(Duration::from_millis(10), "cancelled");
        queue.set_timeout(Duration::from_millis(20), "kept");

        assert!(queue.is_pending(id));
        assert_eq!(queue.clear_timeout(id), Some("cancelled"));
        assert!(!queue.is_pending(id));
        assert_eq!(queue.clear_timeout(id), None);

        assert_eq!(drain(&mut queue, Timestamp::from_millis(100)), vec!["kept"]);
    }

    #[test]
    fn test_clock_follows_fired_timer() {
        let mut queue = TimerQueue::new();
        queue.set_timeout(Duration::from_millis(10), "a");

        let expired = queue.pop_due(Timestamp::from_millis(100)).unwrap();
        assert_eq!(expired.at, Timestamp::from_millis(10));
        assert_eq!(queue.now(), Timestamp::from_millis(10));

        // Relative scheduling is anchored at the fired deadline
        queue.set_timeout(Duration::from_millis(5), "b");
        assert_eq!(queue.next_deadline(), Some(Timestamp::from_millis(15)));
    }

    #[test]
    fn test_past_deadline_is_due_now() {
        let mut queue = TimerQueue::new();
        queue.advance(Timestamp::from_millis(40));
        queue.schedule_at(Timestamp::from_millis(10), "overdue");

        assert_eq!(queue.next_deadline(), Some(Timestamp::from_millis(40)));

        queue.advance(Timestamp::from_millis(20));
        assert_eq!(queue.now(), Timestamp::from_millis(40));
    }
}
