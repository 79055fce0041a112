//! Soft failures: a pluggable warning channel.
//!
//! Warnings report recoverable conditions (an update on an unmounted view, a
//! one-time hook firing twice). The renderer keeps running and stays
//! consistent; listeners are only notified. Every warning is also logged via
//! `tracing` unless [`RendererConfig::log_warnings`](crate::config::RendererConfig)
//! is off.

use std::fmt;
use std::rc::Rc;

use crate::attr::BindingEvent;
use crate::view::Hook;

/// A recoverable condition worth telling the host application about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// `update()` was called on a view that is not mounted (or no longer exists).
    UpdateWhileUnmounted { view: &'static str },
    /// A one-time lifecycle hook was asked to fire a second time.
    HookRepeated { view: &'static str, hook: Hook },
    /// A one-time binding callback was asked to fire a second time.
    BindingRepeated {
        view: &'static str,
        event: BindingEvent,
    },
    /// A value bound as constant changed after mount.
    ConstantChanged { attribute: String },
    /// `update()` reached a view whose own hook is still running.
    ReentrantUpdate { view: &'static str },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UpdateWhileUnmounted { view } => {
                write!(f, "update() called on unmounted view `{view}`")
            }
            Self::HookRepeated { view, hook } => {
                write!(f, "`{hook}` of `{view}` already fired; suppressed")
            }
            Self::BindingRepeated { view, event } => {
                write!(f, "{event:?} binding of `{view}` already fired; suppressed")
            }
            Self::ConstantChanged { attribute } => {
                write!(f, "constant attribute `{attribute}` changed after mount")
            }
            Self::ReentrantUpdate { view } => {
                write!(f, "re-entrant update() of `{view}` skipped")
            }
        }
    }
}

/// Handle returned by [`WarningChannel::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WarningHandlerId(u64);

type Handler = Rc<dyn Fn(&Warning)>;

/// Zero or more warning listeners.
pub struct WarningChannel {
    handlers: Vec<(WarningHandlerId, Handler)>,
    next_id: u64,
    log: bool,
}

impl WarningChannel {
    pub fn new(log: bool) -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
            log,
        }
    }

    /// Register a listener. Listeners run in registration order.
    pub fn subscribe(&mut self, handler: impl Fn(&Warning) + 'static) -> WarningHandlerId {
        let id = WarningHandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Rc::new(handler)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: WarningHandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(h, _)| *h != id);
        before != self.handlers.len()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Deliver a warning to every listener.
    pub fn emit(&self, warning: Warning) {
        if self.log {
            tracing::warn!(%warning, "weft warning");
        }
        for (_, handler) in &self.handlers {
            handler(&warning);
        }
    }
}

impl Default for WarningChannel {
    fn default() -> Self {
        Self::new(true)
    }
}

impl fmt::Debug for WarningChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WarningChannel")
            .field("handlers", &self.handlers.len())
            .field("log", &self.log)
            .finish()
    }
}
