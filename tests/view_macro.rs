//! `view!` markup against the real renderer.

#![cfg(feature = "macros")]

use std::cell::Cell;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use weft::testing::Harness;
use weft::view::{Cx, Spec};
use weft::{view, Result, View};

#[derive(Default)]
struct Badge {
    label: String,
    children: Vec<Spec>,
}

impl Badge {
    fn label(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    fn child(mut self, child: impl Into<Spec>) -> Self {
        self.children.push(child.into());
        self
    }
}

impl View for Badge {
    fn template(&mut self, _cx: &mut Cx<'_>) -> Result<Spec> {
        Ok(Spec::element("span")
            .attr("class", "badge")
            .text(self.label.clone())
            .children(std::mem::take(&mut self.children))
            .build())
    }
}

#[test]
fn test_markup_renders_elements_text_and_views() {
    let name = "Ada";
    let mut harness = Harness::new();
    harness
        .mount_spec(view! {
            <section data-role="profile">
                <h2>"Hello, " {name}</h2>
                <Badge label="admin">
                    <b>"!"</b>
                </Badge>
            </section>
        })
        .unwrap();
    assert_eq!(
        harness.html(),
        r#"<section data-role="profile"><h2>Hello, Ada</h2><span class="badge">admin<b>!</b></span></section>"#
    );
}

#[test]
fn test_markup_bindings_and_listeners() {
    let count = Rc::new(Cell::new(0));
    let click = Rc::clone(&count);
    let read = Rc::clone(&count);
    let mut harness = Harness::new();
    harness
        .mount_spec(view! {
            <button id="go" on:click={move |_| click.set(click.get() + 1)} bind:title={move || read.get()}>
                "Go"
            </button>
        })
        .unwrap();
    assert_eq!(harness.html(), r#"<button id="go" title="0">Go</button>"#);

    let button = harness.by_id("go").unwrap();
    harness.click(button);
    harness.update().unwrap();
    assert_eq!(harness.html(), r#"<button id="go" title="1">Go</button>"#);
}

#[test]
fn test_several_roots_form_a_fragment() {
    let mut harness = Harness::new();
    harness
        .mount_spec(view! {
            <dt>"term"</dt>
            <dd>"definition"</dd>
        })
        .unwrap();
    assert_eq!(harness.html(), "<dt>term</dt><dd>definition</dd>");
}
