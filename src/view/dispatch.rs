//! Lifecycle dispatcher: ordered hook passes for mount, unmount and update.
//!
//! Will-hooks run pre-order (parent, then children); on/did hooks run
//! post-order (children, then parent). Each pass walks the subtree as it is
//! when the pass starts, so a hook that grows the tree mid-mount is seen by
//! later passes, and any one-time hook asked to fire again is suppressed with
//! a warning.
//!
//! A hook error stops the remaining hooks of the pass and propagates. Node
//! insertion and removal still complete, so the document never holds a
//! half-attached range.

use super::lifecycle::{Hook, LifecycleEvent, LifecycleState};
use super::renderer::{Renderer, ViewId};
use super::traits::View;
use super::Cx;
use crate::attr::BindingEvent;
use crate::dom::NodeId;
use crate::error::Result;
use crate::warning::Warning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    Pre,
    Post,
}

impl Hook {
    fn invoke(self, view: &mut dyn View, cx: &mut Cx<'_>) -> Result<()> {
        match self {
            Self::WillMount => view.will_mount(cx),
            Self::OnMount => view.on_mount(cx),
            Self::DidMount => view.did_mount(cx),
            Self::WillUnmount => view.will_unmount(cx),
            Self::OnUnmount => view.on_unmount(cx),
            Self::DidUnmount => view.did_unmount(cx),
            Self::WillUpdate => view.will_update(cx),
            Self::OnUpdate => view.on_update(cx),
            Self::DidUpdate => view.did_update(cx),
        }
    }
}

impl Renderer {
    fn subtree(&self, id: ViewId, order: Order) -> Vec<ViewId> {
        let mut out = Vec::new();
        self.collect(id, order, &mut out);
        out
    }

    fn collect(&self, id: ViewId, order: Order, out: &mut Vec<ViewId>) {
        let Some(slot) = self.views.get(id) else {
            return;
        };
        if order == Order::Pre {
            out.push(id);
        }
        for &child in &slot.children {
            self.collect(child, order, out);
        }
        if order == Order::Post {
            out.push(id);
        }
    }

    fn set_state(&mut self, id: ViewId, state: LifecycleState) {
        if let Some(slot) = self.views.get_mut(id) {
            slot.state = state;
        }
    }

    /// Fire one hook of one view, honoring the at-most-once guard.
    pub(crate) fn fire(&mut self, id: ViewId, hook: Hook) -> Result<()> {
        let Some(slot) = self.views.get_mut(id) else {
            return Ok(());
        };
        let name = slot.name;
        if !slot.hooks.fire(hook) {
            self.warnings.emit(Warning::HookRepeated { view: name, hook });
            return Ok(());
        }
        if self.config.record_lifecycle {
            self.events.push(LifecycleEvent { view: id, name, hook });
        }
        self.with_view(id, |view, cx| hook.invoke(view, cx))
            .unwrap_or(Ok(()))
    }

    fn run_bindings(&mut self, id: ViewId, event: BindingEvent) {
        if let Some(slot) = self.views.get_mut(id) {
            slot.bindings.run(event, &mut self.doc, &self.warnings, slot.name);
        }
    }

    // ── Mount ────────────────────────────────────────────────────────

    /// Attach a freshly built subtree staged in `stage`: will-mount hooks,
    /// insertion into `parent` before `before`, then mount bindings with
    /// `on_mount`, then `did_mount`.
    pub(crate) fn attach(
        &mut self,
        id: ViewId,
        parent: NodeId,
        stage: NodeId,
        before: Option<NodeId>,
    ) -> Result<()> {
        let will = self.will_mount_pass(id);
        self.place(parent, stage, before);
        will?;
        self.mount_pass(id)?;
        self.did_mount_pass(id)
    }

    /// Move the staged nodes into place and drop the staging fragment.
    pub(crate) fn place(&mut self, parent: NodeId, stage: NodeId, before: Option<NodeId>) {
        self.doc.insert_before(parent, stage, before);
        self.doc.destroy(stage);
    }

    fn will_mount_pass(&mut self, id: ViewId) -> Result<()> {
        for view in self.subtree(id, Order::Pre) {
            self.set_state(view, LifecycleState::Mounting);
            self.fire(view, Hook::WillMount)?;
        }
        Ok(())
    }

    fn mount_pass(&mut self, id: ViewId) -> Result<()> {
        for view in self.subtree(id, Order::Post) {
            self.run_bindings(view, BindingEvent::Mount);
            self.fire(view, Hook::OnMount)?;
        }
        Ok(())
    }

    fn did_mount_pass(&mut self, id: ViewId) -> Result<()> {
        for view in self.subtree(id, Order::Post) {
            self.fire(view, Hook::DidMount)?;
            self.set_state(view, LifecycleState::Mounted);
        }
        Ok(())
    }

    // ── Unmount ──────────────────────────────────────────────────────

    /// Unmount a subtree and free it: will-unmount hooks, detach, unmount
    /// bindings with `on_unmount`, `did_unmount`, then free nodes and slots.
    ///
    /// The caller removes `id` from its parent's child list.
    pub(crate) fn teardown(&mut self, id: ViewId) -> Result<()> {
        let nodes = self.nodes(id);
        let hooks = self.unmount_passes(id, &nodes);
        for node in nodes {
            self.doc.destroy(node);
        }
        self.forget(id);
        hooks
    }

    fn unmount_passes(&mut self, id: ViewId, nodes: &[NodeId]) -> Result<()> {
        for view in self.subtree(id, Order::Pre) {
            self.set_state(view, LifecycleState::Unmounting);
            self.fire(view, Hook::WillUnmount)?;
        }
        for &node in nodes {
            self.doc.detach(node);
        }
        for view in self.subtree(id, Order::Post) {
            self.run_bindings(view, BindingEvent::Unmount);
            self.fire(view, Hook::OnUnmount)?;
        }
        for view in self.subtree(id, Order::Post) {
            self.fire(view, Hook::DidUnmount)?;
        }
        Ok(())
    }

    // ── Update ───────────────────────────────────────────────────────

    /// `should_update`, `will_update`, own bindings, `on_update`,
    /// `update_children`, `did_update`.
    pub(crate) fn run_update(&mut self, id: ViewId) -> Result<()> {
        let proceed = self
            .with_view(id, |view, cx| view.should_update(cx))
            .unwrap_or(false);
        if !proceed {
            return Ok(());
        }
        self.fire(id, Hook::WillUpdate)?;
        self.run_bindings(id, BindingEvent::Update);
        self.fire(id, Hook::OnUpdate)?;
        self.with_view(id, |view, cx| view.update_children(cx))
            .unwrap_or(Ok(()))?;
        self.fire(id, Hook::DidUpdate)
    }
}
