//! Attribute values and the value-or-getter props that produce them.

use std::fmt;
use std::rc::Rc;

use crate::dom::{Event, Listener};

/// A resolved attribute value.
///
/// `Absent` is the "undefined" of attribute land: the attribute is removed.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Absent,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Ordered name/value pairs, used by `class` (name → flag) and `style`
    /// (property → value).
    Map(Vec<(String, AttrValue)>),
}

impl AttrValue {
    /// Build a map value from pairs.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<AttrValue>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Truthiness as used by boolean-presence attributes and class maps.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Absent => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
            Self::Map(_) => true,
        }
    }

    /// The string written to the DOM, or `None` when the attribute is absent.
    pub fn to_attribute(&self) -> Option<String> {
        match self {
            Self::Absent => None,
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(n) => Some(format_number(*n)),
            Self::Text(s) => Some(s.clone()),
            Self::Map(entries) => Some(
                entries
                    .iter()
                    .filter(|(_, v)| v.is_truthy())
                    .map(|(k, _)| k.as_str())
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(impl From<$t> for AttrValue {
            fn from(n: $t) -> Self {
                Self::Number(n as f64)
            }
        })*
    };
}

from_integer!(i32, i64, u32, u64, usize);

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// A shared attribute getter.
pub type Getter = Rc<dyn Fn() -> AttrValue>;

/// A prop as written in a [`Spec`](crate::view::Spec): a value or a getter.
#[derive(Clone)]
pub enum Prop {
    /// A plain value, written once.
    Value(AttrValue),
    /// A reactive getter, re-read on every update.
    Getter(Getter),
    /// A getter read once at mount and never again.
    Constant(Getter),
    /// An event callback, for `onX` props and listener-style custom attributes.
    Listener(Listener),
}

impl Prop {
    pub fn value(value: impl Into<AttrValue>) -> Self {
        Self::Value(value.into())
    }

    pub fn getter<V: Into<AttrValue>>(f: impl Fn() -> V + 'static) -> Self {
        Self::Getter(Rc::new(move || f().into()))
    }

    pub fn constant<V: Into<AttrValue>>(f: impl Fn() -> V + 'static) -> Self {
        Self::Constant(Rc::new(move || f().into()))
    }

    pub fn listener(f: impl Fn(&Event) + 'static) -> Self {
        Self::Listener(Listener::new(f))
    }

    /// Read the current value. `None` for listeners.
    pub fn read(&self) -> Option<AttrValue> {
        match self {
            Self::Value(v) => Some(v.clone()),
            Self::Getter(g) | Self::Constant(g) => Some(g()),
            Self::Listener(_) => None,
        }
    }

    /// Whether the prop must be re-read on update.
    pub fn is_reactive(&self) -> bool {
        matches!(self, Self::Getter(_))
    }
}

impl fmt::Debug for Prop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Getter(_) => f.write_str("Getter(<fn>)"),
            Self::Constant(_) => f.write_str("Constant(<fn>)"),
            Self::Listener(_) => f.write_str("Listener(<fn>)"),
        }
    }
}
