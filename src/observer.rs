//! Snapshot subscriptions
//!
//! This module defines the trait through which the store broadcasts
//! snapshots and the registry that keeps subscribers in the order they
//! subscribed.

use std::fmt::Debug;

use derive_where::derive_where;
use uuid::Uuid;

/// Receiver of state snapshots
///
/// Implemented for every `FnMut(&S)` closure, so most subscribers are
/// plain closures. Presentation layers holding their own render state may
/// implement it directly.
pub trait Observer<S> {
    /// Receives the snapshot produced by the latest transition
    ///
    /// # Arguments
    ///
    /// * `snapshot` - The full post-transition state
    fn notify(&mut self, snapshot: &S);
}

impl<S, F: FnMut(&S)> Observer<S> for F {
    fn notify(&mut self, snapshot: &S) {
        self(snapshot);
    }
}

/// Handle returned by a subscription, used to unsubscribe later
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Creates a new random subscription ID
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Ordered set of subscribers for snapshots of type `S`
#[derive_where(Default)]
pub struct Subscribers<S> {
    entries: Vec<(SubscriptionId, Box<dyn Observer<S>>)>,
}

impl<S> Debug for Subscribers<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<S> Subscribers<S> {
    /// Registers an observer after all existing ones
    ///
    /// # Returns
    ///
    /// The ID to pass to [`Subscribers::remove`]
    pub fn add<O: Observer<S> + 'static>(&mut self, observer: O) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.entries.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer
    ///
    /// # Returns
    ///
    /// `true` if the subscription existed, `false` otherwise
    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Delivers a snapshot to every observer in subscription order
    pub fn notify_all(&mut self, snapshot: &S) {
        for (_, observer) in &mut self.entries {
            observer.notify(snapshot);
        }
    }

    /// Returns the number of live subscriptions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if there are no subscriptions
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    #[test]
    fn test_notify_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut subscribers = Subscribers::<u32>::default();

        let first = Rc::clone(&log);
        subscribers.add(move |n: &u32| first.borrow_mut().push(("first", *n)));
        let second = Rc::clone(&log);
        subscribers.add(move |n: &u32| second.borrow_mut().push(("second", *n)));

        subscribers.notify_all(&1);
        subscribers.notify_all(&2);

        assert_eq!(
            *log.borrow(),
            vec![("first", 1), ("second", 1), ("first", 2), ("second", 2)]
        );
    }

    #[test]
    fn test_remove() {
        let count = Rc::new(RefCell::new(0));
        let mut subscribers = Subscribers::<()>::default();

        let counter = Rc::clone(&count);
        let id = subscribers.add(move |_: &()| *counter.borrow_mut() += 1);
        assert_eq!(subscribers.len(), 1);

        subscribers.notify_all(&());
        assert!(subscribers.remove(id));
        assert!(!subscribers.remove(id));
        assert!(subscribers.is_empty());

        subscribers.notify_all(&());
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_observer_trait_impl() {
        struct Recorder(Rc<RefCell<Vec<String>>>);

        impl Observer<String> for Recorder {
            fn notify(&mut self, snapshot: &String) {
                self.0.borrow_mut().push(snapshot.clone());
            }
        }

        let log = Rc::new(RefCell::new(Vec::new()));
        let mut subscribers = Subscribers::<String>::default();
        subscribers.add(Recorder(Rc::clone(&log)));

        subscribers.notify_all(&"hello".to_string());
        assert_eq!(*log.borrow(), vec!["hello".to_string()]);
    }

    #[test]
    fn test_subscription_ids_are_unique() {
        let mut subscribers = Subscribers::<()>::default();
        let a = subscribers.add(|_: &()| {});
        let b = subscribers.add(|_: &()| {});

        assert_ne!(a, b);
        assert_ne!(a.to_string(), b.to_string());
    }
}
