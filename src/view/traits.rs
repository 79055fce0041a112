//! The `View` trait: a stateful component with lifecycle hooks.
//!
//! Every hook receives a [`Cx`] scoped to the view it runs for. Hooks return
//! `Result`: an error aborts the remaining hooks of the current pass and
//! propagates to the caller of `mount`, `unmount` or `update`.

use super::context::Cx;
use super::spec::Spec;
use crate::error::Result;

// ---------------------------------------------------------------------------
// View trait
// ---------------------------------------------------------------------------

/// A user-extensible unit of UI.
///
/// Only [`template`](View::template) is required. The trait is object-safe;
/// the renderer stores views as `Box<dyn View>` in an arena and hands out
/// [`ViewId`](super::ViewId) handles.
///
/// Order guarantees:
///
/// - `will_mount` and `will_unmount` run parent before children.
/// - `on_*` and `did_*` mount/unmount hooks run children before parent.
/// - Within `update`, the view's own bindings refresh before its children,
///   and `did_update` runs after the children updated.
#[allow(unused_variables)]
pub trait View: 'static {
    /// Name used in warnings, logs and lifecycle records.
    fn name(&self) -> &'static str {
        short_type_name::<Self>()
    }

    /// Called once, before `template`.
    fn init(&mut self, cx: &mut Cx<'_>) -> Result<()> {
        Ok(())
    }

    /// Describe this view's content. Called once per view instance.
    fn template(&mut self, cx: &mut Cx<'_>) -> Result<Spec>;

    fn will_mount(&mut self, cx: &mut Cx<'_>) -> Result<()> {
        Ok(())
    }

    /// The view's nodes are in the document; its mount bindings have run.
    fn on_mount(&mut self, cx: &mut Cx<'_>) -> Result<()> {
        Ok(())
    }

    fn did_mount(&mut self, cx: &mut Cx<'_>) -> Result<()> {
        Ok(())
    }

    fn will_unmount(&mut self, cx: &mut Cx<'_>) -> Result<()> {
        Ok(())
    }

    /// The view's nodes are detached but still alive.
    fn on_unmount(&mut self, cx: &mut Cx<'_>) -> Result<()> {
        Ok(())
    }

    fn did_unmount(&mut self, cx: &mut Cx<'_>) -> Result<()> {
        Ok(())
    }

    /// Return `false` to skip this update entirely, children included.
    fn should_update(&mut self, cx: &mut Cx<'_>) -> bool {
        true
    }

    fn will_update(&mut self, cx: &mut Cx<'_>) -> Result<()> {
        Ok(())
    }

    fn on_update(&mut self, cx: &mut Cx<'_>) -> Result<()> {
        Ok(())
    }

    /// Bring the children up to date. Control-flow views override this to
    /// reconcile; the default updates every child in order.
    fn update_children(&mut self, cx: &mut Cx<'_>) -> Result<()> {
        cx.update_children()
    }

    fn did_update(&mut self, cx: &mut Cx<'_>) -> Result<()> {
        Ok(())
    }
}

/// `weft::control::switch::Switch<alloc::string::String>` → `Switch`.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;

    impl View for Plain {
        fn template(&mut self, _cx: &mut Cx<'_>) -> Result<Spec> {
            Ok(Spec::empty())
        }
    }

    #[test]
    fn default_name_is_short_type_name() {
        assert_eq!(Plain.name(), "Plain");
        assert_eq!(short_type_name::<Vec<String>>(), "Vec");
        assert_eq!(short_type_name::<u8>(), "u8");
    }
}
