//! Boolean-presence attributes: present with an empty value when true,
//! absent when false. The DOM is touched only when the flag flips, so no-op
//! writes never reset native widget state.

use super::binding::Binding;
use super::registry::{bind_value, AttributeHandler, Target};
use super::value::Prop;
use crate::error::Result;

/// `disabled`, `checked`, `selected` and any other presence attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanAttribute;

impl AttributeHandler for BooleanAttribute {
    fn bind(&self, target: Target<'_>, prop: &Prop) -> Result<Binding> {
        let name = target.name.to_owned();
        bind_value(target, prop, move |doc, node, previous, next| {
            let now = next.is_truthy();
            if previous.map(|p| p.is_truthy()) == Some(now) {
                return;
            }
            if now {
                doc.set_attribute(node, &name, "");
            } else {
                doc.remove_attribute(node, &name);
            }
        })
    }
}

/// `inert`: takes the subtree out of interaction and the accessibility tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct Inert;

impl AttributeHandler for Inert {
    fn bind(&self, target: Target<'_>, prop: &Prop) -> Result<Binding> {
        bind_value(target, prop, |doc, node, previous, next| {
            let now = next.is_truthy();
            if previous.map(|p| p.is_truthy()) == Some(now) {
                return;
            }
            if now {
                doc.set_attribute(node, "inert", "");
                doc.set_attribute(node, "aria-hidden", "true");
            } else {
                doc.remove_attribute(node, "inert");
                doc.remove_attribute(node, "aria-hidden");
            }
        })
    }
}
