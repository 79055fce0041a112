//! Harness: drive a renderer over a headless document.
//!
//! The `Harness` owns a [`Renderer`], a `<body>` host element and a record of
//! every warning emitted, and provides shortcuts for the things tests do:
//! mount, update, dispatch input, serialize.

use std::cell::RefCell;
use std::rc::Rc;

use super::snapshot::{render_to_string, render_with_markers};
use crate::config::RendererConfig;
use crate::dom::{Document, Event, Mutation, NodeId};
use crate::error::{Error, Result};
use crate::view::{Renderer, Spec, View, ViewId};
use crate::warning::Warning;

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// A headless renderer for testing.
///
/// # Examples
///
/// ```
/// use weft::testing::Harness;
/// use weft::view::Spec;
///
/// let mut harness = Harness::new();
/// harness.mount_spec(Spec::element("h1").text("Title").build()).unwrap();
/// assert_eq!(harness.html(), "<h1>Title</h1>");
/// ```
pub struct Harness {
    renderer: Renderer,
    host: NodeId,
    warnings: Rc<RefCell<Vec<Warning>>>,
}

impl Harness {
    /// Lifecycle and mutation recording on, warning logging off.
    pub fn new() -> Self {
        Self::with_config(
            RendererConfig::new()
                .with_record_lifecycle(true)
                .with_record_mutations(true)
                .with_log_warnings(false),
        )
    }

    pub fn with_config(config: RendererConfig) -> Self {
        let mut renderer = Renderer::with_config(config);
        let host = renderer.document_mut().create_element("body");
        let warnings = Rc::new(RefCell::new(Vec::new()));
        {
            let warnings = Rc::clone(&warnings);
            renderer.on_warning(move |w| warnings.borrow_mut().push(w.clone()));
        }
        Self {
            renderer,
            host,
            warnings,
        }
    }

    // ── Mounting ─────────────────────────────────────────────────────

    pub fn mount(&mut self, view: impl View) -> Result<ViewId> {
        self.renderer.mount(self.host, view)
    }

    pub fn mount_spec(&mut self, spec: Spec) -> Result<ViewId> {
        self.renderer.mount_spec(self.host, spec)
    }

    pub fn unmount(&mut self) -> Result<()> {
        self.renderer.unmount(self.host)
    }

    /// Update the root view.
    pub fn update(&mut self) -> Result<()> {
        let root = self.root().ok_or(Error::NotMounted(self.host))?;
        self.renderer.update(root)
    }

    pub fn root(&self) -> Option<ViewId> {
        self.renderer.root(self.host)
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Dispatch a click at `node`. Returns how many listeners ran.
    pub fn click(&self, node: NodeId) -> usize {
        self.renderer.document().dispatch(&Event::new("click", node))
    }

    /// Dispatch a keydown of `key` at `node`.
    pub fn press(&self, node: NodeId, key: &str) -> usize {
        self.renderer.document().dispatch(&Event::key(key, node))
    }

    // ── Inspection ───────────────────────────────────────────────────

    pub fn host(&self) -> NodeId {
        self.host
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    pub fn document(&self) -> &Document {
        self.renderer.document()
    }

    /// The host's inner HTML, markers left out.
    pub fn html(&self) -> String {
        render_to_string(self.document(), self.host)
    }

    pub fn html_with_markers(&self) -> String {
        render_with_markers(self.document(), self.host)
    }

    /// First element below the host with the given `id` attribute.
    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.document().query_by_id(self.host, id)
    }

    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        self.renderer.document_mut().take_mutations()
    }

    /// Drain the warnings emitted so far.
    pub fn take_warnings(&self) -> Vec<Warning> {
        std::mem::take(&mut *self.warnings.borrow_mut())
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn mount_and_render() {
        let mut harness = Harness::new();
        harness
            .mount_spec(Spec::element("p").attr("id", "x").text("hi").build())
            .unwrap();
        assert_eq!(harness.html(), r#"<p id="x">hi</p>"#);
        assert!(harness.by_id("x").is_some());
    }

    #[test]
    fn update_without_mount_fails() {
        let mut harness = Harness::new();
        assert_eq!(harness.update(), Err(Error::NotMounted(harness.host())));
    }

    #[test]
    fn click_reaches_listener() {
        let clicks = Rc::new(Cell::new(0));
        let mut harness = Harness::new();
        {
            let clicks = Rc::clone(&clicks);
            harness
                .mount_spec(
                    Spec::element("button")
                        .attr("id", "go")
                        .on("click", move |_| clicks.set(clicks.get() + 1))
                        .build(),
                )
                .unwrap();
        }
        let button = harness.by_id("go").unwrap();
        assert_eq!(harness.click(button), 1);
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn records_warnings() {
        let mut harness = Harness::new();
        harness.mount_spec(Spec::text("x")).unwrap();
        let root = harness.root().unwrap();
        harness.unmount().unwrap();
        harness.renderer_mut().update(root).unwrap();
        assert_eq!(
            harness.take_warnings(),
            vec![Warning::UpdateWhileUnmounted { view: "<freed>" }]
        );
        assert!(harness.take_warnings().is_empty());
    }
}
