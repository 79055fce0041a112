//! `Switch`: one active branch, chosen by a derived key.

use std::fmt::Debug;

use crate::dom::NodeId;
use crate::error::{Error, Result};
use crate::view::{Cx, Element, Spec, View};

type KeyFn<K> = Box<dyn Fn() -> K>;
type RenderFn<K> = Box<dyn Fn(&K) -> Spec>;

/// Renders `render(key())`. On update the key is recomputed: an unchanged
/// key only updates the existing child, a changed key replaces the child
/// wholesale.
///
/// If a branch fails to build, the Switch keeps an empty placeholder where
/// the branch belongs and rebuilds from it on the next update.
pub struct Switch<K> {
    key: KeyFn<K>,
    render: RenderFn<K>,
    current: Option<K>,
    hole: Option<NodeId>,
}

impl<K: PartialEq + Debug + 'static> Switch<K> {
    pub fn new(key: impl Fn() -> K + 'static, render: impl Fn(&K) -> Spec + 'static) -> Self {
        Self {
            key: Box::new(key),
            render: Box::new(render),
            current: None,
            hole: None,
        }
    }

    pub fn builder() -> SwitchBuilder<K> {
        SwitchBuilder {
            key: None,
            render: None,
        }
    }

    /// The key of the branch currently shown.
    pub fn current(&self) -> Option<&K> {
        self.current.as_ref()
    }

    /// Park the Switch on `placeholder` after a failed replacement.
    fn leave_hole(&mut self, cx: &mut Cx<'_>, placeholder: NodeId) {
        self.current = None;
        self.hole = Some(placeholder);
        cx.set_root(Element::Node(placeholder));
    }
}

impl<K: PartialEq + Debug + 'static> View for Switch<K> {
    fn name(&self) -> &'static str {
        "Switch"
    }

    fn template(&mut self, _cx: &mut Cx<'_>) -> Result<Spec> {
        let key = (self.key)();
        let child = (self.render)(&key).into_component();
        self.current = Some(key);
        Ok(Spec::View(child))
    }

    fn update_children(&mut self, cx: &mut Cx<'_>) -> Result<()> {
        let key = (self.key)();
        let old = cx.children().first().copied();
        if self.current.as_ref() == Some(&key) {
            return match old {
                Some(child) => cx.update(child),
                None => Ok(()),
            };
        }
        tracing::trace!(from = ?self.current, to = ?key, "switch branch changed");

        let placeholder = match self.hole.take() {
            Some(hole) => hole,
            None => {
                let anchor = cx.first_node().ok_or(Error::UnknownView(cx.id()))?;
                cx.insert_placeholder(anchor)?
            }
        };
        if let Some(old) = old {
            if let Err(err) = cx.remove_children(&[old]) {
                self.leave_hole(cx, placeholder);
                return Err(err);
            }
        }

        let built = cx.build_child((self.render)(&key), placeholder);
        match cx.children().first().copied() {
            // Inserted, even if one of its mount hooks failed.
            Some(child) => {
                cx.set_root(Element::View(child));
                cx.remove_node(placeholder);
                self.current = Some(key);
            }
            None => self.leave_hole(cx, placeholder),
        }
        built.map(|_| ())
    }
}

/// Builder for [`Switch`]. Both parts are required.
pub struct SwitchBuilder<K> {
    key: Option<KeyFn<K>>,
    render: Option<RenderFn<K>>,
}

impl<K: PartialEq + Debug + 'static> SwitchBuilder<K> {
    /// The key getter, re-read on every update.
    pub fn key(mut self, key: impl Fn() -> K + 'static) -> Self {
        self.key = Some(Box::new(key));
        self
    }

    /// Render the branch for a key.
    pub fn render(mut self, render: impl Fn(&K) -> Spec + 'static) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    pub fn build(self) -> Result<Spec> {
        let key = self.key.ok_or_else(|| Error::props("Switch", "missing `key` getter"))?;
        let render = self
            .render
            .ok_or_else(|| Error::props("Switch", "missing `render` function"))?;
        Ok(Spec::view(Switch {
            key,
            render,
            current: None,
            hole: None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testing::{Harness, Probe, ProbeLog};
    use crate::view::Hook;

    fn branch(log: &ProbeLog, key: &'static str) -> Spec {
        let label = if key == "x" { "x" } else { "y" };
        Spec::view(Probe::new(label, log).child(Spec::text(key)))
    }

    #[test]
    fn key_change_replaces_the_branch() {
        let log = ProbeLog::new();
        let key = Rc::new(Cell::new("x"));
        let mut harness = Harness::new();
        {
            let key = Rc::clone(&key);
            let log = log.clone();
            harness
                .mount(Switch::new(move || key.get(), move |k| branch(&log, *k)))
                .unwrap();
        }
        assert_eq!(harness.html(), r#"<div data-probe="x">x</div>"#);
        log.take();

        key.set("y");
        harness.update().unwrap();
        assert_eq!(harness.html(), r#"<div data-probe="y">y</div>"#);
        let fired = log.take();
        for hook in Hook::ONE_TIME_HOOKS {
            let label = if matches!(hook, Hook::WillMount | Hook::OnMount | Hook::DidMount) {
                "y"
            } else {
                "x"
            };
            assert!(fired.contains(&format!("{label}.{hook}")), "{label}.{hook}");
        }
    }

    #[test]
    fn same_key_only_updates_the_child() {
        let log = ProbeLog::new();
        let mut harness = Harness::new();
        {
            let log = log.clone();
            harness.mount(Switch::new(|| "x", move |k| branch(&log, *k))).unwrap();
        }
        log.take();
        harness.update().unwrap();
        assert_eq!(
            log.take(),
            ["x.will_update", "x.on_update", "x.did_update"]
        );
    }

    #[test]
    fn stays_in_place_between_siblings() {
        let flag = Rc::new(Cell::new(true));
        let mut harness = Harness::new();
        let switch = {
            let flag = Rc::clone(&flag);
            Switch::new(
                move || flag.get(),
                |on| Spec::element(if *on { "b" } else { "i" }).text("mid").build(),
            )
        };
        harness
            .mount_spec(
                Spec::element("p")
                    .text("a")
                    .child(Spec::view(switch))
                    .text("z")
                    .build(),
            )
            .unwrap();
        flag.set(false);
        harness.update().unwrap();
        assert_eq!(harness.html(), "<p>a<i>mid</i>z</p>");
        flag.set(true);
        harness.update().unwrap();
        assert_eq!(harness.html(), "<p>a<b>mid</b>z</p>");
        insta::assert_snapshot!(harness.html_with_markers(), @"<p>a<b>mid</b>z</p>");
    }

    struct Unrenderable;

    impl View for Unrenderable {
        fn template(&mut self, _cx: &mut Cx<'_>) -> Result<Spec> {
            Err(Error::InvalidTemplate {
                view: "Unrenderable",
                reason: "no content".into(),
            })
        }
    }

    #[test]
    fn recovers_after_a_branch_fails_to_build() {
        let key = Rc::new(Cell::new(0u8));
        let mut harness = Harness::new();
        {
            let key = Rc::clone(&key);
            let switch = Switch::new(
                move || key.get(),
                |k| match k {
                    0 => Spec::element("b").text("zero").build(),
                    1 => Spec::view(Unrenderable),
                    _ => Spec::element("i").text("two").build(),
                },
            );
            harness
                .mount_spec(
                    Spec::element("p")
                        .text("(")
                        .child(Spec::view(switch))
                        .text(")")
                        .build(),
                )
                .unwrap();
        }
        let p = harness.document().children(harness.host())[0];
        let views = harness.renderer().view_count();

        key.set(1);
        let err = harness.update().unwrap_err();
        assert_eq!(
            err,
            Error::InvalidTemplate {
                view: "Unrenderable",
                reason: "no content".into(),
            }
        );
        assert_eq!(harness.html(), "<p>()</p>");
        assert_eq!(harness.renderer().view_count(), views - 1);

        key.set(2);
        harness.update().unwrap();
        assert_eq!(harness.html(), "<p>(<i>two</i>)</p>");
        assert_eq!(harness.document().children(p).len(), 3);
        assert_eq!(harness.renderer().view_count(), views);

        key.set(0);
        harness.update().unwrap();
        assert_eq!(harness.html(), "<p>(<b>zero</b>)</p>");
        assert_eq!(harness.document().children(p).len(), 3);
    }

    #[test]
    fn builder_requires_both_parts() {
        let err = Switch::<u8>::builder().render(|_| Spec::empty()).build().unwrap_err();
        assert_eq!(err, Error::props("Switch", "missing `key` getter"));
        let err = Switch::builder().key(|| 1).build().unwrap_err();
        assert_eq!(err, Error::props("Switch", "missing `render` function"));
        assert!(Switch::builder().key(|| 1).render(|_| Spec::empty()).build().is_ok());
    }
}
