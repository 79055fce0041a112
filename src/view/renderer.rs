//! The renderer: owns the document, the view arena and the registries.
//!
//! Views live in a `SlotMap` addressed by [`ViewId`]. A view's parent is a
//! handle, never a reference, so teardown is a matter of freeing slots.

use std::collections::HashMap;
use std::fmt;

use slotmap::{new_key_type, SlotMap};

use super::context::Cx;
use super::element::Element;
use super::lifecycle::{HookGuard, LifecycleEvent, LifecycleState};
use super::spec::Spec;
use super::traits::View;
use crate::attr::{AttributeHandler, AttributeRegistry, Binding, Bindings};
use crate::config::RendererConfig;
use crate::dom::{Document, NodeId};
use crate::error::{Error, Result};
use crate::warning::{Warning, WarningChannel, WarningHandlerId};

new_key_type! {
    /// Handle to a view in a [`Renderer`].
    pub struct ViewId;
}

// ---------------------------------------------------------------------------
// ViewSlot
// ---------------------------------------------------------------------------

/// Arena entry for one view.
pub(crate) struct ViewSlot {
    /// Taken out while one of the view's own hooks runs.
    pub(crate) behavior: Option<Box<dyn View>>,
    pub(crate) name: &'static str,
    pub(crate) parent: Option<ViewId>,
    /// Child views in document order.
    pub(crate) children: Vec<ViewId>,
    pub(crate) root: Option<Element>,
    pub(crate) bindings: Bindings,
    pub(crate) state: LifecycleState,
    pub(crate) hooks: HookGuard,
}

impl ViewSlot {
    fn new(behavior: Box<dyn View>, parent: Option<ViewId>) -> Self {
        Self {
            name: behavior.name(),
            behavior: Some(behavior),
            parent,
            children: Vec::new(),
            root: None,
            bindings: Bindings::new(),
            state: LifecycleState::Created,
            hooks: HookGuard::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Mounts views onto host elements and keeps them up to date.
///
/// ```
/// use weft::view::{Renderer, Spec};
///
/// let mut renderer = Renderer::new();
/// let host = renderer.document_mut().create_element("main");
/// renderer
///     .mount_spec(host, Spec::element("p").text("hello").build())
///     .unwrap();
/// assert_eq!(weft::testing::render_to_string(renderer.document(), host), "<p>hello</p>");
/// ```
pub struct Renderer {
    pub(crate) doc: Document,
    pub(crate) views: SlotMap<ViewId, ViewSlot>,
    roots: HashMap<NodeId, ViewId>,
    pub(crate) attributes: AttributeRegistry,
    pub(crate) warnings: WarningChannel,
    pub(crate) config: RendererConfig,
    pub(crate) events: Vec<LifecycleEvent>,
}

impl Renderer {
    /// A renderer over an empty document, with default config and the
    /// built-in attribute handlers.
    pub fn new() -> Self {
        Self::with_config(RendererConfig::default())
    }

    pub fn with_config(config: RendererConfig) -> Self {
        Self::with_document(Document::new(), config)
    }

    /// A renderer over an existing document. The document's mutation log
    /// follows `config.record_mutations`.
    pub fn with_document(mut doc: Document, config: RendererConfig) -> Self {
        doc.set_record_mutations(config.record_mutations);
        let mut attributes = AttributeRegistry::with_defaults();
        attributes.set_check_constants(config.check_constants);
        Self {
            doc,
            views: SlotMap::with_key(),
            roots: HashMap::new(),
            attributes,
            warnings: WarningChannel::new(config.log_warnings),
            config,
            events: Vec::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    // ── Registries ───────────────────────────────────────────────────

    /// Register custom semantics for attribute `name`. Replaces any earlier
    /// handler for that name; applies to specs built from now on.
    pub fn register_attribute(&mut self, name: impl Into<String>, handler: impl AttributeHandler + 'static) {
        self.attributes.register(name, handler);
    }

    pub fn attributes(&self) -> &AttributeRegistry {
        &self.attributes
    }

    /// Subscribe to soft failures.
    pub fn on_warning(&mut self, handler: impl Fn(&Warning) + 'static) -> WarningHandlerId {
        self.warnings.subscribe(handler)
    }

    pub fn remove_warning_handler(&mut self, id: WarningHandlerId) -> bool {
        self.warnings.unsubscribe(id)
    }

    /// Drain the recorded lifecycle events (empty unless
    /// [`RendererConfig::record_lifecycle`] is on).
    pub fn take_lifecycle_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Mount / unmount / update ─────────────────────────────────────

    /// Mount `view` as the content of `host`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidHost`] if `host` is not an element.
    /// - [`Error::AlreadyMounted`] if a view is already mounted on `host`, or
    ///   if `host` lies inside the content of another mounted root.
    /// - Any error from `init`/`template` (nothing is left behind) or from a
    ///   mount hook (the tree stays mounted and can be unmounted).
    pub fn mount(&mut self, host: NodeId, view: impl View) -> Result<ViewId> {
        self.mount_boxed(host, Box::new(view))
    }

    /// Mount any spec, lifting it into a view first.
    pub fn mount_spec(&mut self, host: NodeId, spec: Spec) -> Result<ViewId> {
        self.mount_boxed(host, spec.into_component())
    }

    pub fn mount_boxed(&mut self, host: NodeId, view: Box<dyn View>) -> Result<ViewId> {
        if !self.doc.is_element(host) {
            return Err(Error::InvalidHost(host));
        }
        if self.roots.contains_key(&host) || self.owning_root(host).is_some() {
            return Err(Error::AlreadyMounted(host));
        }

        let stage = self.doc.create_fragment();
        let id = match self.create_view(None, view, stage) {
            Ok(id) => id,
            Err(err) => {
                self.doc.destroy(stage);
                return Err(err);
            }
        };
        self.roots.insert(host, id);
        tracing::debug!(view = self.views[id].name, views = self.views.len(), "mounting root");
        self.attach(id, host, stage, None)?;
        Ok(id)
    }

    /// Unmount the view mounted on `host`, running every unmount hook and
    /// freeing its nodes.
    ///
    /// # Errors
    ///
    /// [`Error::NotMounted`] if nothing was mounted on `host`. A failing hook
    /// skips the rest of the hooks, but the nodes and views are still freed.
    pub fn unmount(&mut self, host: NodeId) -> Result<()> {
        let id = self.roots.remove(&host).ok_or(Error::NotMounted(host))?;
        tracing::debug!(view = self.views.get(id).map_or("?", |s| s.name), "unmounting root");
        self.teardown(id)
    }

    /// The root view mounted on `host`.
    pub fn root(&self, host: NodeId) -> Option<ViewId> {
        self.roots.get(&host).copied()
    }

    /// The mounted root whose content contains `node`, if any.
    fn owning_root(&self, node: NodeId) -> Option<ViewId> {
        let mut chain = self.doc.ancestors(node);
        chain.push(node);
        self.roots
            .values()
            .copied()
            .find(|&root| self.nodes(root).iter().any(|n| chain.contains(n)))
    }

    /// Bring a view up to date.
    ///
    /// Calling this on a view that is not mounted (or no longer exists) is
    /// not an error: one warning is emitted and nothing happens.
    pub fn update(&mut self, id: ViewId) -> Result<()> {
        let Some(slot) = self.views.get(id) else {
            self.warnings.emit(Warning::UpdateWhileUnmounted { view: "<freed>" });
            return Ok(());
        };
        let name = slot.name;
        if !slot.state.is_live() {
            self.warnings.emit(Warning::UpdateWhileUnmounted { view: name });
            return Ok(());
        }
        if slot.behavior.is_none() {
            self.warnings.emit(Warning::ReentrantUpdate { view: name });
            return Ok(());
        }
        self.run_update(id)
    }

    /// Whether `id` exists and is mounted (or mounting).
    pub fn is_mounted(&self, id: ViewId) -> bool {
        self.views.get(id).is_some_and(|slot| slot.state.is_live())
    }

    // ── Inspection ───────────────────────────────────────────────────

    /// The lifecycle state of a view. `None` once the view was unmounted
    /// and freed (or never existed): freed is the terminal state.
    pub fn state(&self, id: ViewId) -> Option<LifecycleState> {
        self.views.get(id).map(|slot| slot.state)
    }

    pub fn view_name(&self, id: ViewId) -> Option<&'static str> {
        self.views.get(id).map(|slot| slot.name)
    }

    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.views.get(id)?.parent
    }

    /// Child views in document order.
    pub fn children(&self, id: ViewId) -> &[ViewId] {
        self.views.get(id).map_or(&[][..], |slot| slot.children.as_slice())
    }

    /// Number of live views.
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// The first host node of a view's content.
    pub fn first_node(&self, id: ViewId) -> Option<NodeId> {
        let root = self.views.get(id)?.root?;
        match root {
            Element::View(child) => self.first_node(child),
            other => other.own_first(),
        }
    }

    pub fn last_node(&self, id: ViewId) -> Option<NodeId> {
        let root = self.views.get(id)?.root?;
        match root {
            Element::View(child) => self.last_node(child),
            other => other.own_last(),
        }
    }

    /// Every top-level host node of a view's content, in document order.
    pub fn nodes(&self, id: ViewId) -> Vec<NodeId> {
        match (self.first_node(id), self.last_node(id)) {
            (Some(first), Some(last)) => self.doc.sibling_range(first, last),
            _ => Vec::new(),
        }
    }

    // ── Building ─────────────────────────────────────────────────────

    /// Run `f` against the view's behavior with a context for `id`.
    ///
    /// `None` if the view does not exist or one of its hooks is already
    /// running.
    pub(crate) fn with_view<R>(
        &mut self,
        id: ViewId,
        f: impl FnOnce(&mut dyn View, &mut Cx<'_>) -> R,
    ) -> Option<R> {
        let mut behavior = self.views.get_mut(id)?.behavior.take()?;
        let out = f(behavior.as_mut(), &mut Cx::new(self, id));
        if let Some(slot) = self.views.get_mut(id) {
            slot.behavior = Some(behavior);
        }
        Some(out)
    }

    /// Instantiate a view: `init`, then `template`, then build the template
    /// into `into`. On failure the view and its descendants are freed.
    pub(crate) fn create_view(
        &mut self,
        parent: Option<ViewId>,
        view: Box<dyn View>,
        into: NodeId,
    ) -> Result<ViewId> {
        let id = self.views.insert(ViewSlot::new(view, parent));
        match self.render_view(id, into) {
            Ok(()) => Ok(id),
            Err(err) => {
                self.forget(id);
                Err(err)
            }
        }
    }

    fn render_view(&mut self, id: ViewId, into: NodeId) -> Result<()> {
        self.with_view(id, |view, cx| view.init(cx))
            .unwrap_or(Err(Error::UnknownView(id)))?;
        let spec = self
            .with_view(id, |view, cx| view.template(cx))
            .unwrap_or(Err(Error::UnknownView(id)))?;
        let root = self.build(id, spec, into)?;
        if let Some(slot) = self.views.get_mut(id) {
            slot.root = Some(root);
        }
        Ok(())
    }

    /// Turn `spec` into nodes appended to `into`. Bindings go to `owner`.
    fn build(&mut self, owner: ViewId, spec: Spec, into: NodeId) -> Result<Element> {
        match spec {
            Spec::Element(el) => {
                let node = self.doc.create_element(&el.tag);
                self.doc.append_child(into, node);
                for (name, prop) in &el.props {
                    let binding = self.attributes.bind(&mut self.doc, node, name, prop)?;
                    self.absorb(owner, binding);
                }
                for child in el.children {
                    self.build(owner, child, node)?;
                }
                Ok(Element::Node(node))
            }
            Spec::Text(prop) => {
                let node = self.doc.create_text("");
                self.doc.append_child(into, node);
                let binding = self.attributes.bind_text(&mut self.doc, node, &prop)?;
                self.absorb(owner, binding);
                Ok(Element::Node(node))
            }
            Spec::Fragment(children) => {
                let start = self.doc.create_comment("[");
                self.doc.append_child(into, start);
                for child in children {
                    self.build(owner, child, into)?;
                }
                let end = self.doc.create_comment("]");
                self.doc.append_child(into, end);
                Ok(Element::Fragment { start, end })
            }
            Spec::View(view) => {
                let child = self.create_view(Some(owner), view, into)?;
                if let Some(slot) = self.views.get_mut(owner) {
                    slot.children.push(child);
                }
                Ok(Element::View(child))
            }
        }
    }

    fn absorb(&mut self, owner: ViewId, binding: Binding) {
        if let Some(slot) = self.views.get_mut(owner) {
            slot.bindings.absorb(binding);
        }
    }

    /// Free a view and its descendants without running hooks.
    pub(crate) fn forget(&mut self, id: ViewId) {
        if let Some(slot) = self.views.remove(id) {
            for child in slot.children {
                self.forget(child);
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("nodes", &self.doc.len())
            .field("views", &self.views.len())
            .field("roots", &self.roots.len())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;

    fn counter_paragraph(n: &Rc<Cell<u32>>) -> Spec {
        let n = Rc::clone(n);
        Spec::element("p")
            .attr("id", "x")
            .child(Spec::dynamic_text(move || n.get()))
            .build()
    }

    #[test]
    fn updates_leave_no_log_behind_by_default() {
        let n = Rc::new(Cell::new(0));
        let mut renderer = Renderer::new();
        let host = renderer.document_mut().create_element("body");
        let root = renderer.mount_spec(host, counter_paragraph(&n)).unwrap();
        for i in 1..=1000 {
            n.set(i);
            renderer.update(root).unwrap();
        }
        assert!(renderer.document().mutations().is_empty());
        assert_eq!(
            crate::testing::render_to_string(renderer.document(), host),
            r#"<p id="x">1000</p>"#
        );
    }

    #[test]
    fn mutation_log_follows_config() {
        let n = Rc::new(Cell::new(0));
        let mut renderer =
            Renderer::with_config(RendererConfig::new().with_record_mutations(true));
        let host = renderer.document_mut().create_element("body");
        let root = renderer.mount_spec(host, counter_paragraph(&n)).unwrap();
        renderer.document_mut().take_mutations();
        n.set(1);
        renderer.update(root).unwrap();
        assert_eq!(renderer.document().mutations().len(), 1);
    }

    #[test]
    fn host_inside_mounted_content_is_rejected() {
        let n = Rc::new(Cell::new(0));
        let mut renderer = Renderer::new();
        let body = renderer.document_mut().create_element("body");
        renderer.mount_spec(body, counter_paragraph(&n)).unwrap();
        let owned = renderer.document().query_by_id(body, "x").unwrap();

        let err = renderer
            .mount_spec(owned, Spec::element("span").build())
            .unwrap_err();
        assert_eq!(err, Error::AlreadyMounted(owned));
        assert_eq!(renderer.view_count(), 1);

        renderer.unmount(body).unwrap();
        assert_eq!(renderer.view_count(), 0);
    }

    #[test]
    fn sibling_hosts_mount_independently() {
        let mut renderer = Renderer::new();
        let body = renderer.document_mut().create_element("body");
        let left = renderer.document_mut().create_element("div");
        let right = renderer.document_mut().create_element("div");
        renderer.document_mut().append_child(body, left);
        renderer.document_mut().append_child(body, right);

        renderer.mount_spec(left, Spec::text("l")).unwrap();
        renderer.mount_spec(right, Spec::text("r")).unwrap();
        // A plain ancestor of a host is not view content.
        renderer.mount_spec(body, Spec::text("b")).unwrap();
        assert_eq!(
            crate::testing::render_to_string(renderer.document(), body),
            "<div>l</div><div>r</div>b"
        );
    }

    #[test]
    fn freed_view_has_no_state() {
        let mut renderer = Renderer::new();
        let host = renderer.document_mut().create_element("body");
        let root = renderer.mount_spec(host, Spec::text("t")).unwrap();
        assert_eq!(renderer.state(root), Some(LifecycleState::Mounted));
        renderer.unmount(host).unwrap();
        assert_eq!(renderer.state(root), None);
    }
}
