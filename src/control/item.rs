//! `Item`: a shared, refreshable handle to one list entry.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// The value a control-flow child renders from.
///
/// The parent keeps a clone and overwrites the value when the entry is
/// retained across an update, so getters built from an `Item` read fresh
/// data.
pub struct Item<T>(Rc<RefCell<T>>);

impl<T> Item<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    /// Borrow the current value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow())
    }

    pub fn set(&self, value: T) {
        *self.0.borrow_mut() = value;
    }
}

impl<T: Clone> Item<T> {
    /// A copy of the current value.
    pub fn get(&self) -> T {
        self.0.borrow().clone()
    }
}

impl<T> Clone for Item<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Item<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Item").field(&*self.0.borrow()).finish()
    }
}
