//! Views: specs, the `View` trait, the renderer and its lifecycle dispatcher.
//!
//! - [`Spec`]: what to render, created per render pass.
//! - [`Element`]: what a spec became once mounted.
//! - [`View`]: stateful component with lifecycle hooks.
//! - [`Renderer`]: arena of views over a [`Document`](crate::dom::Document).

pub mod context;
mod dispatch;
pub mod element;
pub mod lifecycle;
pub mod renderer;
pub mod spec;
pub mod static_view;
pub mod traits;

pub use context::Cx;
pub use element::Element;
pub use lifecycle::{Hook, HookGuard, LifecycleEvent, LifecycleState};
pub use renderer::{Renderer, ViewId};
pub use spec::{ElementSpec, Spec};
pub use static_view::Static;
pub use traits::{short_type_name, View};
