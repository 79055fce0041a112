//! Attribute registry: resolves every prop of an element into DOM effects.
//!
//! Resolution order for a prop named `name`:
//!
//! 1. a handler registered under `name`;
//! 2. `onX` names become a native listener attached on mount, detached on unmount;
//! 3. the generic handler, which sets the attribute (or removes it when the
//!    value is [`AttrValue::Absent`]).
//!
//! Every reactive binding keeps a snapshot of its previous value and writes
//! only when the new value differs.

use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::binding::Binding;
use super::class::ClassHandler;
use super::interaction::{Autofocus, Tap};
use super::presence::{BooleanAttribute, Inert};
use super::style::StyleHandler;
use super::value::{AttrValue, Prop};
use crate::dom::{Document, NodeId};
use crate::error::{Error, Result};
use crate::warning::Warning;

/// The node a prop is being bound to.
pub struct Target<'a> {
    pub doc: &'a mut Document,
    pub node: NodeId,
    pub name: &'a str,
    /// Whether constant getters get a change-detection callback.
    pub check_constants: bool,
}

impl Target<'_> {
    fn invalid(&self, expected: &'static str) -> Error {
        Error::InvalidAttribute {
            name: self.name.to_owned(),
            expected,
        }
    }
}

/// Custom attribute semantics.
pub trait AttributeHandler {
    /// Apply the initial effect of `prop` to `target` and return the
    /// callbacks to run later.
    fn bind(&self, target: Target<'_>, prop: &Prop) -> Result<Binding>;
}

impl<F> AttributeHandler for F
where
    F: Fn(Target<'_>, &Prop) -> Result<Binding>,
{
    fn bind(&self, target: Target<'_>, prop: &Prop) -> Result<Binding> {
        self(target, prop)
    }
}

/// Bind a value-or-getter prop through `apply(doc, node, previous, next)`.
///
/// `apply` runs once immediately with `previous = None`. Reactive getters then
/// re-run it on update, but only when the value changed.
pub fn bind_value<A>(target: Target<'_>, prop: &Prop, mut apply: A) -> Result<Binding>
where
    A: FnMut(&mut Document, NodeId, Option<&AttrValue>, &AttrValue) + 'static,
{
    let initial = prop
        .read()
        .ok_or_else(|| target.invalid("a value or getter, not a listener"))?;
    let Target {
        doc,
        node,
        name,
        check_constants,
    } = target;
    apply(doc, node, None, &initial);

    let binding = Binding::new();
    Ok(match prop {
        Prop::Getter(getter) => {
            let getter = Rc::clone(getter);
            let mut previous = initial;
            binding.on_update(move |doc, _| {
                let next = getter();
                if next != previous {
                    apply(doc, node, Some(&previous), &next);
                    previous = next;
                }
            })
        }
        Prop::Constant(getter) if check_constants => {
            let getter = Rc::clone(getter);
            let attribute = name.to_owned();
            let mut reported = false;
            binding.on_update(move |_, warnings| {
                if !reported && getter() != initial {
                    reported = true;
                    warnings.emit(Warning::ConstantChanged {
                        attribute: attribute.clone(),
                    });
                }
            })
        }
        _ => binding,
    })
}

/// Bind a listener prop to a native event: attach on mount, detach on unmount.
pub fn bind_listener(target: Target<'_>, event: &str, prop: &Prop) -> Result<Binding> {
    let Prop::Listener(listener) = prop else {
        return Err(target.invalid("a listener"));
    };
    let node = target.node;
    let listener = listener.clone();
    let event = event.to_owned();
    let handle = Rc::new(Cell::new(None));
    let attached = Rc::clone(&handle);
    Ok(Binding::new()
        .on_mount(move |doc, _| attached.set(Some(doc.add_listener(node, &event, listener.clone()))))
        .on_unmount(move |doc, _| {
            if let Some(h) = handle.take() {
                doc.remove_listener(node, h);
            }
        }))
}

/// Bind the content of a text node.
pub fn bind_text(target: Target<'_>, prop: &Prop) -> Result<Binding> {
    bind_value(target, prop, |doc, node, _, next| {
        doc.set_text(node, next.to_attribute().unwrap_or_default());
    })
}

/// Sets or removes a plain attribute.
fn bind_generic(target: Target<'_>, prop: &Prop) -> Result<Binding> {
    let name = target.name.to_owned();
    bind_value(target, prop, move |doc, node, _, next| match next.to_attribute() {
        Some(value) => doc.set_attribute(node, &name, &value),
        None => doc.remove_attribute(node, &name),
    })
}

/// `onclick` → `click`, `onKeyDown` → `keydown`.
fn listener_event(name: &str) -> Option<String> {
    name.strip_prefix("on")
        .filter(|rest| !rest.is_empty())
        .map(str::to_ascii_lowercase)
}

/// Name → handler table. Registration is append-only: a later registration
/// replaces an earlier one, and handlers are never removed.
pub struct AttributeRegistry {
    handlers: HashMap<String, Rc<dyn AttributeHandler>>,
    check_constants: bool,
}

impl AttributeRegistry {
    /// An empty registry: only listener and generic resolution apply.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            check_constants: false,
        }
    }

    /// A registry with the built-in handlers: `class`, `style`, the boolean
    /// attributes `disabled`/`checked`/`selected`, and `tap`, `inert`,
    /// `autofocus`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("class", ClassHandler);
        registry.register("style", StyleHandler);
        for name in ["disabled", "checked", "selected"] {
            registry.register(name, BooleanAttribute);
        }
        registry.register("tap", Tap);
        registry.register("inert", Inert);
        registry.register("autofocus", Autofocus);
        registry
    }

    /// Register custom semantics for `name`.
    pub fn register(&mut self, name: impl Into<String>, handler: impl AttributeHandler + 'static) {
        let name = name.into();
        if self.handlers.insert(name.clone(), Rc::new(handler)).is_some() {
            tracing::debug!(attribute = %name, "attribute handler replaced");
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn set_check_constants(&mut self, on: bool) {
        self.check_constants = on;
    }

    /// Resolve `prop` for attribute `name` on `node`.
    pub fn bind(&self, doc: &mut Document, node: NodeId, name: &str, prop: &Prop) -> Result<Binding> {
        let target = Target {
            doc,
            node,
            name,
            check_constants: self.check_constants,
        };
        if let Some(handler) = self.handlers.get(name) {
            return handler.bind(target, prop);
        }
        if let Some(event) = listener_event(name) {
            return bind_listener(target, &event, prop);
        }
        bind_generic(target, prop)
    }

    /// Bind a text node's content, honoring the constant-check setting.
    pub fn bind_text(&self, doc: &mut Document, node: NodeId, prop: &Prop) -> Result<Binding> {
        bind_text(
            Target {
                doc,
                node,
                name: "#text",
                check_constants: self.check_constants,
            },
            prop,
        )
    }
}

impl Default for AttributeRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for AttributeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.handlers.keys().collect();
        names.sort();
        f.debug_struct("AttributeRegistry")
            .field("handlers", &names)
            .field("check_constants", &self.check_constants)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::attr::{BindingEvent, Bindings};
    use crate::dom::{Event, Mutation};
    use crate::warning::WarningChannel;

    fn setup() -> (Document, NodeId) {
        let mut doc = Document::recording();
        let node = doc.create_element("div");
        (doc, node)
    }

    fn run(binding: Binding, event: BindingEvent, doc: &mut Document) -> Bindings {
        let mut bindings = Bindings::new();
        bindings.absorb(binding);
        bindings.run(event, doc, &WarningChannel::new(false), "test");
        bindings
    }

    #[test]
    fn listener_event_names() {
        assert_eq!(listener_event("onclick").as_deref(), Some("click"));
        assert_eq!(listener_event("onKeyDown").as_deref(), Some("keydown"));
        assert_eq!(listener_event("on"), None);
        assert_eq!(listener_event("title"), None);
    }

    #[test]
    fn generic_static_value_sets_attribute_once() {
        let (mut doc, node) = setup();
        let registry = AttributeRegistry::new();
        let binding = registry
            .bind(&mut doc, node, "title", &Prop::value("hello"))
            .unwrap();
        assert!(binding.is_empty());
        assert_eq!(doc.attribute(node, "title").as_deref(), Some("hello"));
    }

    #[test]
    fn generic_absent_means_no_attribute() {
        let (mut doc, node) = setup();
        let registry = AttributeRegistry::new();
        registry
            .bind(&mut doc, node, "title", &Prop::value(None::<&str>))
            .unwrap();
        assert!(!doc.has_attribute(node, "title"));
        assert!(doc.take_mutations().is_empty());
    }

    #[test]
    fn reactive_getter_writes_only_on_change() {
        let (mut doc, node) = setup();
        let title = Rc::new(RefCell::new("a".to_string()));
        let prop = {
            let title = Rc::clone(&title);
            Prop::getter(move || title.borrow().clone())
        };
        let registry = AttributeRegistry::new();
        let binding = registry.bind(&mut doc, node, "title", &prop).unwrap();
        let mut bindings = Bindings::new();
        bindings.absorb(binding);
        doc.take_mutations();

        let warnings = WarningChannel::new(false);
        bindings.run(BindingEvent::Update, &mut doc, &warnings, "t");
        assert!(doc.take_mutations().is_empty());

        *title.borrow_mut() = "b".into();
        bindings.run(BindingEvent::Update, &mut doc, &warnings, "t");
        assert_eq!(doc.attribute(node, "title").as_deref(), Some("b"));
        assert_eq!(doc.take_mutations().len(), 1);
    }

    #[test]
    fn constant_is_never_reread_by_default() {
        let (mut doc, node) = setup();
        let reads = Rc::new(Cell::new(0));
        let prop = {
            let reads = Rc::clone(&reads);
            Prop::constant(move || {
                reads.set(reads.get() + 1);
                "fixed"
            })
        };
        let binding = AttributeRegistry::new()
            .bind(&mut doc, node, "title", &prop)
            .unwrap();
        assert_eq!(binding.count(BindingEvent::Update), 0);
        run(binding, BindingEvent::Update, &mut doc);
        assert_eq!(reads.get(), 1);
    }

    #[test]
    fn constant_change_warns_once_when_checked() {
        let (mut doc, node) = setup();
        let value = Rc::new(Cell::new(1));
        let prop = {
            let value = Rc::clone(&value);
            Prop::constant(move || value.get())
        };
        let mut registry = AttributeRegistry::new();
        registry.set_check_constants(true);
        let mut bindings = Bindings::new();
        bindings.absorb(registry.bind(&mut doc, node, "data-n", &prop).unwrap());

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut warnings = WarningChannel::new(false);
        {
            let seen = Rc::clone(&seen);
            warnings.subscribe(move |w| seen.borrow_mut().push(w.clone()));
        }
        value.set(2);
        doc.take_mutations();
        bindings.run(BindingEvent::Update, &mut doc, &warnings, "t");
        bindings.run(BindingEvent::Update, &mut doc, &warnings, "t");

        assert_eq!(
            *seen.borrow(),
            vec![Warning::ConstantChanged { attribute: "data-n".into() }]
        );
        assert_eq!(doc.attribute(node, "data-n").as_deref(), Some("1"));
        assert!(doc.take_mutations().is_empty());
    }

    #[test]
    fn on_prefix_attaches_and_detaches_listener() {
        let (mut doc, node) = setup();
        let clicks = Rc::new(Cell::new(0));
        let prop = {
            let clicks = Rc::clone(&clicks);
            Prop::listener(move |_| clicks.set(clicks.get() + 1))
        };
        let binding = AttributeRegistry::new()
            .bind(&mut doc, node, "onclick", &prop)
            .unwrap();
        assert_eq!(doc.listener_count(node, "click"), 0);

        let mut bindings = run(binding, BindingEvent::Mount, &mut doc);
        doc.dispatch(&Event::new("click", node));
        assert_eq!(clicks.get(), 1);

        bindings.run(BindingEvent::Unmount, &mut doc, &WarningChannel::new(false), "t");
        assert_eq!(doc.listener_count(node, "click"), 0);
    }

    #[test]
    fn on_prefix_rejects_plain_values() {
        let (mut doc, node) = setup();
        let err = AttributeRegistry::new()
            .bind(&mut doc, node, "onclick", &Prop::value("alert()"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidAttribute { .. }));
    }

    #[test]
    fn listener_rejected_for_value_attribute() {
        let (mut doc, node) = setup();
        let err = AttributeRegistry::new()
            .bind(&mut doc, node, "title", &Prop::listener(|_| {}))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "attribute `title` expects a value or getter, not a listener"
        );
    }

    #[test]
    fn custom_handler_wins_over_generic() {
        let (mut doc, node) = setup();
        let mut registry = AttributeRegistry::new();
        registry.register("shout", |target: Target<'_>, prop: &Prop| {
            bind_value(target, prop, |doc, node, _, next| {
                let text = next.to_attribute().unwrap_or_default().to_uppercase();
                doc.set_attribute(node, "data-shout", &text);
            })
        });
        assert!(registry.contains("shout"));
        registry
            .bind(&mut doc, node, "shout", &Prop::value("hey"))
            .unwrap();
        assert_eq!(doc.attribute(node, "data-shout").as_deref(), Some("HEY"));
        assert!(!doc.has_attribute(node, "shout"));
    }

    #[test]
    fn text_binding_updates_content() {
        let mut doc = Document::recording();
        let node = doc.create_text("");
        let count = Rc::new(Cell::new(1));
        let prop = {
            let count = Rc::clone(&count);
            Prop::getter(move || format!("count: {}", count.get()))
        };
        let registry = AttributeRegistry::new();
        let binding = registry.bind_text(&mut doc, node, &prop).unwrap();
        assert_eq!(doc.text(node), Some("count: 1"));
        count.set(2);
        run(binding, BindingEvent::Update, &mut doc);
        assert_eq!(doc.text(node), Some("count: 2"));
        assert!(matches!(doc.mutations().last(), Some(Mutation::SetText { .. })));
    }

    #[test]
    fn defaults_are_registered() {
        let registry = AttributeRegistry::with_defaults();
        for name in ["class", "style", "disabled", "checked", "selected", "tap", "inert", "autofocus"] {
            assert!(registry.contains(name), "{name} missing");
        }
        assert_eq!(registry.len(), 8);
    }
}
