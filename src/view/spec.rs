//! Specs: immutable descriptions of what to render.
//!
//! A [`Spec`] is created on every render pass and consumed when the renderer
//! turns it into mounted nodes and views.

use std::fmt;

use super::static_view::Static;
use super::traits::View;
use crate::attr::{AttrValue, Prop};
use crate::dom::Event;

/// A node descriptor. The set of kinds is closed.
pub enum Spec {
    /// A host element with props and children.
    Element(ElementSpec),
    /// A text node, static or getter-backed.
    Text(Prop),
    /// A run of siblings bounded by two marker comments.
    Fragment(Vec<Spec>),
    /// A child view.
    View(Box<dyn View>),
}

impl Spec {
    /// Start an element spec.
    pub fn element(tag: impl Into<String>) -> ElementSpec {
        ElementSpec::new(tag)
    }

    pub fn text(value: impl Into<AttrValue>) -> Self {
        Self::Text(Prop::value(value))
    }

    /// A text node re-read on every update of its owning view.
    pub fn dynamic_text<V: Into<AttrValue>>(f: impl Fn() -> V + 'static) -> Self {
        Self::Text(Prop::getter(f))
    }

    pub fn fragment(children: impl IntoIterator<Item = Spec>) -> Self {
        Self::Fragment(children.into_iter().collect())
    }

    /// An empty fragment: just the boundary markers.
    pub fn empty() -> Self {
        Self::Fragment(Vec::new())
    }

    pub fn view(view: impl View) -> Self {
        Self::View(Box::new(view))
    }

    /// Lift this spec into a view. View specs are returned as is; anything
    /// else is wrapped in a [`Static`] view that renders it once.
    pub fn into_component(self) -> Box<dyn View> {
        match self {
            Self::View(view) => view,
            other => Box::new(Static::new(other)),
        }
    }

    pub fn is_view(&self) -> bool {
        matches!(self, Self::View(_))
    }
}

impl fmt::Debug for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(el) => fmt::Debug::fmt(el, f),
            Self::Text(prop) => f.debug_tuple("Text").field(prop).finish(),
            Self::Fragment(children) => f.debug_tuple("Fragment").field(children).finish(),
            Self::View(view) => write!(f, "View({})", view.name()),
        }
    }
}

impl From<ElementSpec> for Spec {
    fn from(el: ElementSpec) -> Self {
        Self::Element(el)
    }
}

impl From<&str> for Spec {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for Spec {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

/// Builder for [`Spec::Element`].
#[derive(Debug)]
pub struct ElementSpec {
    pub tag: String,
    pub props: Vec<(String, Prop)>,
    pub children: Vec<Spec>,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            props: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set a prop. A later prop with the same name replaces the earlier one.
    pub fn prop(mut self, name: impl Into<String>, prop: Prop) -> Self {
        let name = name.into();
        self.props.retain(|(n, _)| *n != name);
        self.props.push((name, prop));
        self
    }

    /// A plain value, written once.
    pub fn attr(self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.prop(name, Prop::value(value))
    }

    /// A reactive value, re-read on every update.
    pub fn bind<V: Into<AttrValue>>(self, name: impl Into<String>, f: impl Fn() -> V + 'static) -> Self {
        self.prop(name, Prop::getter(f))
    }

    /// A getter read once at mount.
    pub fn constant<V: Into<AttrValue>>(
        self,
        name: impl Into<String>,
        f: impl Fn() -> V + 'static,
    ) -> Self {
        self.prop(name, Prop::constant(f))
    }

    /// A native event listener: `on("click", ..)` binds the `onclick` prop.
    pub fn on(self, event: &str, f: impl Fn(&Event) + 'static) -> Self {
        self.prop(format!("on{event}"), Prop::listener(f))
    }

    pub fn child(mut self, child: impl Into<Spec>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Spec>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn text(self, text: impl Into<AttrValue>) -> Self {
        self.child(Spec::text(text))
    }

    pub fn build(self) -> Spec {
        Spec::Element(self)
    }
}
