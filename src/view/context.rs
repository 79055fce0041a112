//! `Cx`: what a view can reach while one of its hooks runs.

use super::element::Element;
use super::renderer::{Renderer, ViewId};
use super::spec::Spec;
use crate::dom::{Document, NodeId};
use crate::error::{Error, Result};
use crate::warning::Warning;

/// Context handed to every [`View`](super::View) hook, scoped to one view.
pub struct Cx<'a> {
    rt: &'a mut Renderer,
    id: ViewId,
}

impl<'a> Cx<'a> {
    pub(crate) fn new(rt: &'a mut Renderer, id: ViewId) -> Self {
        Self { rt, id }
    }

    /// The view this context belongs to.
    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn parent(&self) -> Option<ViewId> {
        self.rt.parent(self.id)
    }

    /// This view's children in document order.
    pub fn children(&self) -> &[ViewId] {
        self.rt.children(self.id)
    }

    pub fn document(&self) -> &Document {
        &self.rt.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.rt.doc
    }

    pub fn is_mounted(&self, id: ViewId) -> bool {
        self.rt.is_mounted(id)
    }

    /// Update any view. Updating this view from its own hook is skipped with
    /// a warning.
    pub fn update(&mut self, id: ViewId) -> Result<()> {
        self.rt.update(id)
    }

    /// Update every child in document order.
    pub fn update_children(&mut self) -> Result<()> {
        for child in self.children().to_vec() {
            self.rt.update(child)?;
        }
        Ok(())
    }

    pub fn warn(&self, warning: Warning) {
        self.rt.warnings.emit(warning);
    }

    // ── Node range ───────────────────────────────────────────────────

    /// First host node of this view's content.
    pub fn first_node(&self) -> Option<NodeId> {
        self.rt.first_node(self.id)
    }

    pub fn last_node(&self) -> Option<NodeId> {
        self.rt.last_node(self.id)
    }

    pub fn first_node_of(&self, id: ViewId) -> Option<NodeId> {
        self.rt.first_node(id)
    }

    /// Insert an empty text node before `before` to hold a position while
    /// the content around it is replaced.
    pub fn insert_placeholder(&mut self, before: NodeId) -> Result<NodeId> {
        let parent = self.rt.doc.parent(before).ok_or(Error::DetachedNode(before))?;
        let marker = self.rt.doc.create_text("");
        self.rt.doc.insert_before(parent, marker, Some(before));
        Ok(marker)
    }

    /// Detach and free a node this view created.
    pub fn remove_node(&mut self, node: NodeId) {
        self.rt.doc.destroy(node);
    }

    // ── Children ─────────────────────────────────────────────────────

    /// Build `spec` as a new child view, placed before `before`.
    ///
    /// The child is appended to this view's child list. If this view is
    /// mounted (or mounting) the child goes through the full mount pipeline.
    pub fn build_child(&mut self, spec: Spec, before: NodeId) -> Result<ViewId> {
        let parent = self.rt.doc.parent(before).ok_or(Error::DetachedNode(before))?;
        let stage = self.rt.doc.create_fragment();
        let child = match self.rt.create_view(Some(self.id), spec.into_component(), stage) {
            Ok(child) => child,
            Err(err) => {
                self.rt.doc.destroy(stage);
                return Err(err);
            }
        };
        let live = match self.rt.views.get_mut(self.id) {
            Some(slot) => {
                slot.children.push(child);
                slot.state.is_live()
            }
            None => false,
        };
        if live {
            self.rt.attach(child, parent, stage, Some(before))?;
        } else {
            self.rt.place(parent, stage, Some(before));
        }
        Ok(child)
    }

    /// Move a child's nodes so they end right before `before`.
    pub fn move_child(&mut self, id: ViewId, before: NodeId) -> Result<()> {
        let parent = self.rt.doc.parent(before).ok_or(Error::DetachedNode(before))?;
        for node in self.rt.nodes(id) {
            self.rt.doc.insert_before(parent, node, Some(before));
        }
        Ok(())
    }

    /// Unmount and free the given children, last first. `ids` should be in
    /// document order. The child list is compacted in a single pass, even
    /// when a hook fails midway.
    pub fn remove_children(&mut self, ids: &[ViewId]) -> Result<()> {
        let result = ids.iter().rev().try_for_each(|&id| self.rt.teardown(id));
        if let Some(slot) = self.rt.views.get_mut(self.id) {
            let mut children = std::mem::take(&mut slot.children);
            children.retain(|&child| self.rt.views.contains_key(child));
            if let Some(slot) = self.rt.views.get_mut(self.id) {
                slot.children = children;
            }
        }
        result
    }

    /// Replace the child list, e.g. after reordering.
    pub fn set_children(&mut self, ids: Vec<ViewId>) {
        if let Some(slot) = self.rt.views.get_mut(self.id) {
            slot.children = ids;
        }
    }

    /// Point this view's root at a new element.
    pub fn set_root(&mut self, root: Element) {
        if let Some(slot) = self.rt.views.get_mut(self.id) {
            slot.root = Some(root);
        }
    }
}
