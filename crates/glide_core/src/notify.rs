//! Host notification sources
//!
//! A [`Notifier`] stands in for a process-wide event source such as window
//! resize. Widgets subscribe at initialization and keep the returned
//! [`Subscription`]; dropping it unregisters the listener, so teardown is
//! deterministic.
//!
//! Notifications are queued per listener in timestamp order and pulled by
//! the owner when it pumps its own event loop.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SlotMap};

use crate::time::Timestamp;

new_key_type! {
    /// Identifier of a registered listener
    pub struct ListenerId;
}

/// A delivered notification.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification<T> {
    pub at: Timestamp,
    pub payload: T,
}

type Inboxes<T> = SlotMap<ListenerId, VecDeque<Notification<T>>>;

/// Broadcast source of `T` notifications.
///
/// Cloning a notifier yields another handle onto the same listener set.
pub struct Notifier<T> {
    inboxes: Rc<RefCell<Inboxes<T>>>,
}

impl<T: Clone> Notifier<T> {
    pub fn new() -> Self {
        Self {
            inboxes: Rc::new(RefCell::new(SlotMap::with_key())),
        }
    }

    /// Register a listener. Notifications sent before this call are not
    /// delivered to it.
    pub fn subscribe(&self) -> Subscription<T> {
        let id = self.inboxes.borrow_mut().insert(VecDeque::new());
        tracing::trace!(?id, "listener subscribed");
        Subscription {
            id,
            inboxes: Rc::downgrade(&self.inboxes),
        }
    }

    /// Deliver `payload` to every listener. Returns the number of listeners
    /// reached.
    ///
    /// Inboxes stay ordered by timestamp; notifications sent with the same
    /// timestamp keep their send order.
    pub fn notify(&self, at: Timestamp, payload: T) -> usize {
        let mut inboxes = self.inboxes.borrow_mut();
        for (_, inbox) in inboxes.iter_mut() {
            let index = inbox.partition_point(|queued| queued.at <= at);
            inbox.insert(
                index,
                Notification {
                    at,
                    payload: payload.clone(),
                },
            );
        }
        inboxes.len()
    }

    pub fn listener_count(&self) -> usize {
        self.inboxes.borrow().len()
    }
}

impl<T: Clone> Default for Notifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Notifier<T> {
    fn clone(&self) -> Self {
        Self {
            inboxes: Rc::clone(&self.inboxes),
        }
    }
}

/// Listener handle. Unregisters itself when dropped.
pub struct Subscription<T> {
    id: ListenerId,
    inboxes: Weak<RefCell<Inboxes<T>>>,
}

impl<T> Subscription<T> {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// False once the notifier itself is gone.
    pub fn is_attached(&self) -> bool {
        self.inboxes
            .upgrade()
            .is_some_and(|inboxes| inboxes.borrow().contains_key(self.id))
    }

    /// Timestamp of the oldest undelivered notification.
    pub fn peek_at(&self) -> Option<Timestamp> {
        let inboxes = self.inboxes.upgrade()?;
        let inboxes = inboxes.borrow();
        inboxes.get(self.id)?.front().map(|n| n.at)
    }

    /// Take the oldest notification if it was sent at or before `until`.
    pub fn pop_until(&self, until: Timestamp) -> Option<Notification<T>> {
        let inboxes = self.inboxes.upgrade()?;
        let mut inboxes = inboxes.borrow_mut();
        let inbox = inboxes.get_mut(self.id)?;
        if inbox.front()?.at > until {
            return None;
        }
        inbox.pop_front()
    }

    /// Number of queued notifications
    pub fn pending(&self) -> usize {
        self.inboxes
            .upgrade()
            .and_then(|inboxes| inboxes.borrow().get(self.id).map(VecDeque::len))
            .unwrap_or(0)
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(inboxes) = self.inboxes.upgrade() {
            inboxes.borrow_mut().remove(self.id);
            tracing::trace!(id = ?self.id, "listener unsubscribed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_to_all_listeners() {
        let notifier = Notifier::new();
        let a = notifier.subscribe();
        let b = notifier.subscribe();

        assert_eq!(notifier.notify(Timestamp::from_millis(5), 640u32), 2);

        assert_eq!(a.pending(), 1);
        assert_eq!(
            b.pop_until(Timestamp::from_millis(5)),
            Some(Notification {
                at: Timestamp::from_millis(5),
                payload: 640
            })
        );
        assert_eq!(b.pending(), 0);
    }

    #[test]
    fn test_pop_until_respects_time() {
        let notifier = Notifier::new();
        let sub = notifier.subscribe();
        notifier.notify(Timestamp::from_millis(10), "a");
        notifier.notify(Timestamp::from_millis(20), "b");

        assert_eq!(sub.peek_at(), Some(Timestamp::from_millis(10)));
        assert_eq!(sub.pop_until(Timestamp::from_millis(15)).map(|n| n.payload), Some("a"));
        assert_eq!(sub.pop_until(Timestamp::from_millis(15)), None);
        assert_eq!(sub.pop_until(Timestamp::from_millis(20)).map(|n| n.payload), Some("b"));
    }

    #[test]
    fn test_late_sent_earlier_notification_is_not_blocked() {
        let notifier = Notifier::new();
        let sub = notifier.subscribe();
        notifier.notify(Timestamp::from_millis(50), "late");
        notifier.notify(Timestamp::from_millis(10), "early");
        notifier.notify(Timestamp::from_millis(10), "early-2");

        assert_eq!(sub.peek_at(), Some(Timestamp::from_millis(10)));
        let due: Vec<_> = std::iter::from_fn(|| sub.pop_until(Timestamp::from_millis(20)))
            .map(|n| n.payload)
            .collect();
        assert_eq!(due, vec!["early", "early-2"]);
        assert_eq!(sub.pending(), 1);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let notifier = Notifier::new();
        let sub = notifier.subscribe();
        let other = notifier.subscribe();
        assert_ne!(sub.id(), other.id());
        drop(other);
        assert_eq!(notifier.listener_count(), 1);
        assert!(sub.is_attached());

        drop(sub);
        assert_eq!(notifier.listener_count(), 0);
        assert_eq!(notifier.notify(Timestamp::ZERO, ()), 0);
    }

    #[test]
    fn test_subscription_outlives_notifier() {
        let notifier = Notifier::new();
        let sub = notifier.subscribe();
        notifier.notify(Timestamp::ZERO, 1u8);
        drop(notifier);

        assert!(!sub.is_attached());
        assert_eq!(sub.pending(), 0);
        assert_eq!(sub.pop_until(Timestamp::from_millis(1)), None);
    }
}
