//! Bindings: the DOM effects a resolved prop schedules per lifecycle event.

use std::collections::HashMap;
use std::fmt;

use crate::dom::Document;
use crate::warning::{Warning, WarningChannel};

/// The lifecycle moment a binding callback runs at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingEvent {
    /// After the owning view's nodes are inserted. Fires at most once.
    Mount,
    /// On every `update()` of the owning view.
    Update,
    /// While the owning view is being removed. Fires at most once.
    Unmount,
}

impl BindingEvent {
    pub fn is_one_time(self) -> bool {
        !matches!(self, Self::Update)
    }
}

/// A binding callback. Gets the document and the warning channel.
pub type BindingCallback = Box<dyn FnMut(&mut Document, &WarningChannel)>;

/// The result of binding one prop: its initial effect has already been
/// applied; these are the callbacks left to run later.
#[derive(Default)]
pub struct Binding {
    callbacks: Vec<(BindingEvent, BindingCallback)>,
}

impl Binding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `f` for `event` (builder).
    pub fn on(
        mut self,
        event: BindingEvent,
        f: impl FnMut(&mut Document, &WarningChannel) + 'static,
    ) -> Self {
        self.callbacks.push((event, Box::new(f)));
        self
    }

    pub fn on_mount(self, f: impl FnMut(&mut Document, &WarningChannel) + 'static) -> Self {
        self.on(BindingEvent::Mount, f)
    }

    pub fn on_update(self, f: impl FnMut(&mut Document, &WarningChannel) + 'static) -> Self {
        self.on(BindingEvent::Update, f)
    }

    pub fn on_unmount(self, f: impl FnMut(&mut Document, &WarningChannel) + 'static) -> Self {
        self.on(BindingEvent::Unmount, f)
    }

    /// Number of scheduled callbacks for `event`.
    pub fn count(&self, event: BindingEvent) -> usize {
        self.callbacks.iter().filter(|(e, _)| *e == event).count()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.callbacks.iter().map(|(e, _)| e))
            .finish()
    }
}

/// Two-state machine for callbacks that may fire at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireState {
    Armed,
    Fired,
}

struct Bound {
    state: FireState,
    callback: BindingCallback,
}

/// Per-view binding table: event → ordered callbacks.
#[derive(Default)]
pub struct Bindings {
    table: HashMap<BindingEvent, Vec<Bound>>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take over every callback of `binding`, keeping their order.
    pub fn absorb(&mut self, binding: Binding) {
        for (event, callback) in binding.callbacks {
            self.table.entry(event).or_default().push(Bound {
                state: FireState::Armed,
                callback,
            });
        }
    }

    pub fn count(&self, event: BindingEvent) -> usize {
        self.table.get(&event).map_or(0, Vec::len)
    }

    /// Run every callback registered for `event`, in order.
    ///
    /// One-time callbacks that already fired are skipped and reported as
    /// [`Warning::BindingRepeated`].
    pub fn run(
        &mut self,
        event: BindingEvent,
        doc: &mut Document,
        warnings: &WarningChannel,
        view: &'static str,
    ) {
        let Some(list) = self.table.get_mut(&event) else {
            return;
        };
        let mut repeated = false;
        for bound in list.iter_mut() {
            if event.is_one_time() {
                if bound.state == FireState::Fired {
                    repeated = true;
                    continue;
                }
                bound.state = FireState::Fired;
            }
            (bound.callback)(doc, warnings);
        }
        if repeated {
            warnings.emit(Warning::BindingRepeated { view, event });
        }
    }
}

impl fmt::Debug for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.table.iter().map(|(e, list)| (e, list.len())))
            .finish()
    }
}
