//! Conditionals: thin key-deriving wrappers over [`Switch`].
//!
//! | Primitive   | Key derived from                         |
//! |-------------|------------------------------------------|
//! | `Show`/`If` | `when()` → `"true"` / `"false"`          |
//! | `Hide`      | `!when()` → `"true"` / `"false"`         |
//! | `IfElse`    | like `Show`, with a required `otherwise` |
//! | `IfDefined` | `value()` → `"defined"` / `"undefined"`  |

use std::cell::RefCell;
use std::rc::Rc;

use super::item::Item;
use super::switch::Switch;
use crate::error::{Error, Result};
use crate::view::Spec;

type Cond = Rc<dyn Fn() -> bool>;
type Branch = Rc<dyn Fn() -> Spec>;

fn bool_key(on: bool) -> &'static str {
    if on {
        "true"
    } else {
        "false"
    }
}

// ---------------------------------------------------------------------------
// Show / Hide / If / IfElse
// ---------------------------------------------------------------------------

/// Renders `then` while `when()` holds, `otherwise` (or nothing) when not.
pub struct Show;

/// Renders `then` while `when()` does NOT hold.
pub struct Hide;

/// Same as [`Show`].
pub struct If;

/// Two branches; both are required.
pub struct IfElse;

impl Show {
    pub fn when(when: impl Fn() -> bool + 'static) -> ConditionBuilder {
        ConditionBuilder::new("Show", Rc::new(when), false, false)
    }
}

impl Hide {
    pub fn when(when: impl Fn() -> bool + 'static) -> ConditionBuilder {
        ConditionBuilder::new("Hide", Rc::new(when), true, false)
    }
}

impl If {
    pub fn when(when: impl Fn() -> bool + 'static) -> ConditionBuilder {
        ConditionBuilder::new("If", Rc::new(when), false, false)
    }
}

impl IfElse {
    pub fn when(when: impl Fn() -> bool + 'static) -> ConditionBuilder {
        ConditionBuilder::new("IfElse", Rc::new(when), false, true)
    }
}

/// Builder shared by the boolean conditionals.
pub struct ConditionBuilder {
    component: &'static str,
    when: Cond,
    invert: bool,
    needs_otherwise: bool,
    then: Option<Branch>,
    otherwise: Option<Branch>,
}

impl ConditionBuilder {
    fn new(component: &'static str, when: Cond, invert: bool, needs_otherwise: bool) -> Self {
        Self {
            component,
            when,
            invert,
            needs_otherwise,
            then: None,
            otherwise: None,
        }
    }

    /// The branch shown while the condition is active.
    pub fn then(mut self, render: impl Fn() -> Spec + 'static) -> Self {
        self.then = Some(Rc::new(render));
        self
    }

    /// The branch shown otherwise.
    pub fn otherwise(mut self, render: impl Fn() -> Spec + 'static) -> Self {
        self.otherwise = Some(Rc::new(render));
        self
    }

    pub fn build(self) -> Result<Spec> {
        let then = self
            .then
            .ok_or_else(|| Error::props(self.component, "missing `then` branch"))?;
        if self.needs_otherwise && self.otherwise.is_none() {
            return Err(Error::props(self.component, "missing `otherwise` branch"));
        }
        let when = self.when;
        let invert = self.invert;
        let otherwise = self.otherwise;
        Ok(Spec::view(Switch::new(
            move || bool_key(when() != invert),
            move |key| match (*key, &otherwise) {
                ("true", _) => then(),
                (_, Some(otherwise)) => otherwise(),
                _ => Spec::empty(),
            },
        )))
    }
}

// ---------------------------------------------------------------------------
// IfDefined
// ---------------------------------------------------------------------------

/// Renders `then` with the value while `value()` is `Some`.
///
/// The value reaches the branch through an [`Item`] that is refreshed on
/// every update, so the branch sees new values without being rebuilt.
pub struct IfDefined;

impl IfDefined {
    pub fn value<T: Clone + 'static>(value: impl Fn() -> Option<T> + 'static) -> IfDefinedBuilder<T> {
        IfDefinedBuilder {
            value: Rc::new(value),
            then: None,
            otherwise: None,
        }
    }
}

type Defined<T> = Rc<dyn Fn(Item<T>) -> Spec>;

pub struct IfDefinedBuilder<T> {
    value: Rc<dyn Fn() -> Option<T>>,
    then: Option<Defined<T>>,
    otherwise: Option<Branch>,
}

impl<T: Clone + 'static> IfDefinedBuilder<T> {
    pub fn then(mut self, render: impl Fn(Item<T>) -> Spec + 'static) -> Self {
        self.then = Some(Rc::new(render));
        self
    }

    pub fn otherwise(mut self, render: impl Fn() -> Spec + 'static) -> Self {
        self.otherwise = Some(Rc::new(render));
        self
    }

    pub fn build(self) -> Result<Spec> {
        let then = self
            .then
            .ok_or_else(|| Error::props("IfDefined", "missing `then` branch"))?;
        let value = self.value;
        let otherwise = self.otherwise;
        let current: Rc<RefCell<Option<Item<T>>>> = Rc::new(RefCell::new(None));
        let shown = Rc::clone(&current);

        Ok(Spec::view(Switch::new(
            move || {
                let mut slot = current.borrow_mut();
                match value() {
                    Some(v) => {
                        match slot.as_ref() {
                            Some(item) => item.set(v),
                            None => *slot = Some(Item::new(v)),
                        }
                        "defined"
                    }
                    None => {
                        *slot = None;
                        "undefined"
                    }
                }
            },
            move |key| {
                let item = shown.borrow().clone();
                match (*key, item, &otherwise) {
                    ("defined", Some(item), _) => then(item),
                    (_, _, Some(otherwise)) => otherwise(),
                    _ => Spec::empty(),
                }
            },
        )))
    }
}
