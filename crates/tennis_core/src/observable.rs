//! Observable Values
//!
//! A value cell that notifies registered subscribers whenever it is set.
//! Presentation code hangs off these cells; the engine never knows who is
//! listening.
//!
//! ## Ordering
//! Subscribers fire synchronously inside [`Observable::set`], after the new
//! value is stored, in registration order. Unsubscribed handlers are removed
//! immediately and never fire again.
//!
//! ## Usage
//! ```
//! use tennis_core::observable::Observable;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let mut cell = Observable::new(0u32);
//! let sink = Rc::clone(&seen);
//! let id = cell.subscribe(move |v| sink.borrow_mut().push(*v));
//! cell.set(3);
//! cell.unsubscribe(id);
//! cell.set(4);
//! assert_eq!(*seen.borrow(), vec![3]);
//! ```

use std::fmt;

/// Handle returned by [`Observable::subscribe`], used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(usize);

/// Subscriber callback. Receives the committed value.
pub type Subscriber<T> = Box<dyn FnMut(&T)>;

pub struct Observable<T> {
    value: T,
    subscribers: Vec<(SubscriberId, Subscriber<T>)>,
    next_id: usize,
}

impl<T> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Store `value`, then notify every subscriber with it.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.notify();
    }

    /// Store `value` and notify only if it differs from the current one.
    /// Returns whether subscribers were notified.
    pub fn set_if_changed(&mut self, value: T) -> bool
    where
        T: PartialEq,
    {
        if self.value == value {
            return false;
        }
        self.set(value);
        true
    }

    /// Register a callback. Multiple callbacks per value are allowed.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriberId
    where
        F: FnMut(&T) + 'static,
    {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if the id was unknown or already removed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(subscriber_id, _)| *subscriber_id != id);
        self.subscribers.len() != before
    }

    /// Re-publish the current value without changing it.
    pub fn notify(&mut self) {
        let value = &self.value;
        for (_, callback) in self.subscribers.iter_mut() {
            callback(value);
        }
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
