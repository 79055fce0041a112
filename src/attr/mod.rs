//! Attribute binding registry: turns props into DOM effects.
//!
//! - [`AttributeRegistry`]: name → handler table and the resolution order.
//! - [`Binding`] / [`Bindings`]: callbacks keyed by [`BindingEvent`].
//! - Built-in handlers: [`ClassHandler`], [`StyleHandler`],
//!   [`BooleanAttribute`], [`Inert`], [`Tap`], [`Autofocus`].

pub mod binding;
pub mod class;
pub mod interaction;
pub mod presence;
pub mod registry;
pub mod style;
pub mod value;

pub use binding::{Binding, BindingCallback, BindingEvent, Bindings, FireState};
pub use class::ClassHandler;
pub use interaction::{Autofocus, Tap};
pub use presence::{BooleanAttribute, Inert};
pub use registry::{bind_listener, bind_text, bind_value, AttributeHandler, AttributeRegistry, Target};
pub use style::StyleHandler;
pub use value::{AttrValue, Getter, Prop};
