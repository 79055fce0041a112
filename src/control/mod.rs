//! Control-flow views built on the renderer and the keyed planner.
//!
//! - [`Switch`]: one branch, replaced wholesale when its key changes.
//! - [`List`]: keyed iteration with minimal moves; identity and range forms.
//! - [`Show`], [`Hide`], [`If`], [`IfElse`], [`IfDefined`]: key-deriving
//!   wrappers over `Switch`.

pub mod item;
pub mod list;
pub mod show;
pub mod switch;

pub use item::Item;
pub use list::{integer_range, List, ListBuilder};
pub use show::{ConditionBuilder, Hide, If, IfDefined, IfDefinedBuilder, IfElse, Show};
pub use switch::{Switch, SwitchBuilder};
