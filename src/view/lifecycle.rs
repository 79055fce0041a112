//! View lifecycle: states, hooks and the at-most-once guard for one-time hooks.

use std::fmt;

use super::renderer::ViewId;
use crate::attr::FireState;

// ---------------------------------------------------------------------------
// LifecycleState
// ---------------------------------------------------------------------------

/// Where a view is in its life.
///
/// `Created → Mounting → Mounted → Unmounting`; a view that finished
/// unmounting is freed, so there is no terminal state to observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// Built (init + template ran) but not yet attached.
    #[default]
    Created,
    /// Will-mount hooks are running or nodes are being inserted.
    Mounting,
    Mounted,
    /// Pending unmount: will-unmount hooks ran, removal is in progress.
    Unmounting,
}

impl LifecycleState {
    /// Whether `update()` is allowed. A view still mounting counts as live.
    pub fn is_live(self) -> bool {
        matches!(self, Self::Mounting | Self::Mounted)
    }
}

// ---------------------------------------------------------------------------
// Hook
// ---------------------------------------------------------------------------

/// A lifecycle hook of [`View`](super::View).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    WillMount,
    OnMount,
    DidMount,
    WillUnmount,
    OnUnmount,
    DidUnmount,
    WillUpdate,
    OnUpdate,
    DidUpdate,
}

impl Hook {
    /// The hooks that fire at most once per view.
    pub const ONE_TIME_HOOKS: [Hook; 6] = [
        Hook::WillMount,
        Hook::OnMount,
        Hook::DidMount,
        Hook::WillUnmount,
        Hook::OnUnmount,
        Hook::DidUnmount,
    ];

    /// Mount and unmount hooks fire at most once per view.
    pub fn is_one_time(self) -> bool {
        self.guard_index().is_some()
    }

    fn guard_index(self) -> Option<usize> {
        Self::ONE_TIME_HOOKS.iter().position(|&h| h == self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::WillMount => "will_mount",
            Self::OnMount => "on_mount",
            Self::DidMount => "did_mount",
            Self::WillUnmount => "will_unmount",
            Self::OnUnmount => "on_unmount",
            Self::DidUnmount => "did_unmount",
            Self::WillUpdate => "will_update",
            Self::OnUpdate => "on_update",
            Self::DidUpdate => "did_update",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// HookGuard
// ---------------------------------------------------------------------------

/// Armed/fired state of each one-time hook of a single view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookGuard {
    states: [FireState; 6],
}

impl Default for HookGuard {
    fn default() -> Self {
        Self {
            states: [FireState::Armed; 6],
        }
    }
}

impl HookGuard {
    /// Move `hook` from armed to fired. Returns `false` if it had already
    /// fired. Repeatable hooks always return `true`.
    pub fn fire(&mut self, hook: Hook) -> bool {
        let Some(i) = hook.guard_index() else {
            return true;
        };
        match self.states[i] {
            FireState::Armed => {
                self.states[i] = FireState::Fired;
                true
            }
            FireState::Fired => false,
        }
    }

    pub fn has_fired(&self, hook: Hook) -> bool {
        hook.guard_index()
            .is_some_and(|i| self.states[i] == FireState::Fired)
    }
}

// ---------------------------------------------------------------------------
// LifecycleEvent
// ---------------------------------------------------------------------------

/// A fired hook, recorded when
/// [`RendererConfig::record_lifecycle`](crate::config::RendererConfig) is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleEvent {
    pub view: ViewId,
    pub name: &'static str,
    pub hook: Hook,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_time_hooks() {
        assert!(Hook::WillMount.is_one_time());
        assert!(Hook::DidUnmount.is_one_time());
        assert!(!Hook::OnUpdate.is_one_time());
    }

    #[test]
    fn guard_fires_once() {
        let mut guard = HookGuard::default();
        assert!(!guard.has_fired(Hook::OnMount));
        assert!(guard.fire(Hook::OnMount));
        assert!(guard.has_fired(Hook::OnMount));
        assert!(!guard.fire(Hook::OnMount));
        assert!(guard.fire(Hook::WillUnmount));
    }

    #[test]
    fn update_hooks_are_never_guarded() {
        let mut guard = HookGuard::default();
        for _ in 0..3 {
            assert!(guard.fire(Hook::DidUpdate));
        }
        assert!(!guard.has_fired(Hook::DidUpdate));
    }

    #[test]
    fn live_states() {
        assert!(!LifecycleState::Created.is_live());
        assert!(LifecycleState::Mounting.is_live());
        assert!(LifecycleState::Mounted.is_live());
        assert!(!LifecycleState::Unmounting.is_live());
    }

    #[test]
    fn hook_display() {
        assert_eq!(Hook::WillMount.to_string(), "will_mount");
        assert_eq!(Hook::DidUpdate.to_string(), "did_update");
    }
}
