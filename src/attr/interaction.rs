//! Interaction attributes: `tap` gestures and imperative focus.

use std::cell::RefCell;
use std::rc::Rc;

use super::binding::Binding;
use super::registry::{AttributeHandler, Target};
use super::value::Prop;
use crate::dom::{Event, Listener};
use crate::error::{Error, Result};

/// `tap`: activation by click, or by Enter/Space while focused.
///
/// Takes a listener prop. Native listeners are attached on mount and
/// detached on unmount.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tap;

const TAP_EVENTS: [&str; 2] = ["click", "keydown"];

fn is_activation(event: &Event) -> bool {
    event.kind == "click" || matches!(event.key.as_deref(), Some("Enter" | " "))
}

impl AttributeHandler for Tap {
    fn bind(&self, target: Target<'_>, prop: &Prop) -> Result<Binding> {
        let Prop::Listener(listener) = prop else {
            return Err(Error::InvalidAttribute {
                name: target.name.to_owned(),
                expected: "a listener",
            });
        };
        let node = target.node;
        let inner = listener.clone();
        let activate = Listener::new(move |event| {
            if is_activation(event) {
                inner.call(event);
            }
        });

        let handles = Rc::new(RefCell::new(Vec::new()));
        let attached = Rc::clone(&handles);
        Ok(Binding::new()
            .on_mount(move |doc, _| {
                let mut attached = attached.borrow_mut();
                for event in TAP_EVENTS {
                    attached.push(doc.add_listener(node, event, activate.clone()));
                }
            })
            .on_unmount(move |doc, _| {
                for handle in handles.borrow_mut().drain(..) {
                    doc.remove_listener(node, handle);
                }
            }))
    }
}

/// `autofocus`: focuses the node on mount when truthy, and again whenever a
/// reactive value flips from falsy to truthy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Autofocus;

impl AttributeHandler for Autofocus {
    fn bind(&self, target: Target<'_>, prop: &Prop) -> Result<Binding> {
        let initial = prop.read().ok_or_else(|| Error::InvalidAttribute {
            name: target.name.to_owned(),
            expected: "a value or getter, not a listener",
        })?;
        let node = target.node;
        let wants_focus = initial.is_truthy();
        let binding = Binding::new().on_mount(move |doc, _| {
            if wants_focus {
                doc.focus(node);
            }
        });
        let Prop::Getter(getter) = prop else {
            return Ok(binding);
        };
        let getter = Rc::clone(getter);
        let mut previous = wants_focus;
        Ok(binding.on_update(move |doc, _| {
            let now = getter().is_truthy();
            if now && !previous {
                doc.focus(node);
            }
            previous = now;
        }))
    }
}
