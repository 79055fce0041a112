//! `class`: a string or a map of class name → flag, applied as token deltas.

use super::binding::Binding;
use super::registry::{bind_value, AttributeHandler, Target};
use super::value::{AttrValue, Prop};
use crate::error::Result;

/// Diffs the previous and next token sets and issues only the add/remove
/// deltas, so classes set by other code are left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassHandler;

/// The class tokens a value stands for, deduplicated, in order.
pub fn class_tokens(value: &AttrValue) -> Vec<String> {
    let raw: Vec<&str> = match value {
        AttrValue::Text(s) => s.split_whitespace().collect(),
        AttrValue::Map(entries) => entries
            .iter()
            .filter(|(_, flag)| flag.is_truthy())
            .flat_map(|(name, _)| name.split_whitespace())
            .collect(),
        AttrValue::Absent | AttrValue::Bool(_) | AttrValue::Number(_) => Vec::new(),
    };
    let mut tokens: Vec<String> = Vec::with_capacity(raw.len());
    for token in raw {
        if !tokens.iter().any(|t| t == token) {
            tokens.push(token.to_owned());
        }
    }
    tokens
}

impl AttributeHandler for ClassHandler {
    fn bind(&self, target: Target<'_>, prop: &Prop) -> Result<Binding> {
        bind_value(target, prop, |doc, node, previous, next| {
            let old = previous.map(class_tokens).unwrap_or_default();
            let new = class_tokens(next);
            for class in old.iter().filter(|c| !new.contains(c)) {
                doc.remove_class(node, class);
            }
            for class in new.iter().filter(|c| !old.contains(c)) {
                doc.add_class(node, class);
            }
        })
    }
}
