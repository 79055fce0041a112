//! Native events and listeners attached to host nodes.

use std::fmt;
use std::rc::Rc;

use super::node::NodeId;

/// An event delivered to host listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Event type, e.g. `"click"` or `"keydown"`.
    pub kind: String,
    /// Key name for keyboard events (`"Enter"`, `" "`, ...).
    pub key: Option<String>,
    /// The node the event was dispatched on.
    pub target: NodeId,
}

impl Event {
    pub fn new(kind: impl Into<String>, target: NodeId) -> Self {
        Self {
            kind: kind.into(),
            key: None,
            target,
        }
    }

    /// A `keydown` event for the given key.
    pub fn key(key: impl Into<String>, target: NodeId) -> Self {
        Self {
            kind: "keydown".into(),
            key: Some(key.into()),
            target,
        }
    }
}

/// A shared event callback.
#[derive(Clone)]
pub struct Listener(Rc<dyn Fn(&Event)>);

impl Listener {
    pub fn new(f: impl Fn(&Event) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, event: &Event) {
        (self.0)(event)
    }

    /// Whether both handles point at the same callback.
    pub fn ptr_eq(&self, other: &Listener) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Listener(<fn>)")
    }
}

/// Handle returned by [`Document::add_listener`](super::Document::add_listener).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);
