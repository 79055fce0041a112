//! `style`: a string or a property map, serialized and rewritten only when
//! the serialized form changes.

use super::binding::Binding;
use super::registry::{bind_value, AttributeHandler, Target};
use super::value::{AttrValue, Prop};
use crate::error::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct StyleHandler;

/// Serialize a style value to `prop: value; prop: value`. Absent entries are
/// skipped.
pub fn serialize_style(value: &AttrValue) -> String {
    match value {
        AttrValue::Text(s) => s.trim().to_owned(),
        AttrValue::Map(entries) => entries
            .iter()
            .filter_map(|(property, v)| {
                v.to_attribute().map(|v| format!("{property}: {v}"))
            })
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_attribute().unwrap_or_default(),
    }
}

impl AttributeHandler for StyleHandler {
    fn bind(&self, target: Target<'_>, prop: &Prop) -> Result<Binding> {
        bind_value(target, prop, |doc, node, previous, next| {
            let new = serialize_style(next);
            if previous.map(serialize_style).as_deref() == Some(new.as_str()) {
                return;
            }
            if new.is_empty() {
                doc.remove_attribute(node, "style");
            } else {
                doc.set_attribute(node, "style", &new);
            }
        })
    }
}
