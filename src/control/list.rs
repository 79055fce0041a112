//! Keyed list iteration.
//!
//! `List` renders one child view per item and, on update, reconciles the
//! children against the new key order with the LIS-based planner: removed
//! keys are unmounted, new keys are built in place, and only the items that
//! fall out of the longest already-ordered run are moved.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use super::item::Item;
use crate::error::{Error, Result};
use crate::reconcile::{index_keys, plan};
use crate::view::{Cx, Spec, View, ViewId};

type EachFn<T> = Rc<dyn Fn() -> Vec<T>>;
type KeyFn<T, K> = Rc<dyn Fn(&T) -> K>;
type RenderFn<T> = Rc<dyn Fn(Item<T>) -> Spec>;

/// A keyed list of child views.
///
/// Children receive an [`Item`] handle; a retained item has its value
/// refreshed before its child is updated, so the child reads current data
/// without being rebuilt.
pub struct List<T, K> {
    each: EachFn<T>,
    key: KeyFn<T, K>,
    render: RenderFn<T>,
    /// Keys in document order, parallel to the view's children.
    keys: Vec<K>,
    items: HashMap<K, Item<T>>,
}

impl<T, K> List<T, K>
where
    T: Clone + 'static,
    K: Hash + Eq + Clone + Debug + 'static,
{
    pub fn new(
        each: impl Fn() -> Vec<T> + 'static,
        key: impl Fn(&T) -> K + 'static,
        render: impl Fn(Item<T>) -> Spec + 'static,
    ) -> Self {
        Self {
            each: Rc::new(each),
            key: Rc::new(key),
            render: Rc::new(render),
            keys: Vec::new(),
            items: HashMap::new(),
        }
    }

    pub fn builder() -> ListBuilder<T, K> {
        ListBuilder {
            each: None,
            key: None,
            render: None,
        }
    }

    /// Current keys in document order.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    fn child_spec(&mut self, key: &K, value: T) -> Spec {
        let item = Item::new(value);
        self.items.insert(key.clone(), item.clone());
        Spec::View((self.render)(item).into_component())
    }
}

impl<T> List<T, T>
where
    T: Hash + Eq + Clone + Debug + 'static,
{
    /// A list keyed by the item values themselves.
    pub fn identity(
        each: impl Fn() -> Vec<T> + 'static,
        render: impl Fn(Item<T>) -> Spec + 'static,
    ) -> Self {
        Self::new(each, T::clone, render)
    }
}

impl List<i64, i64> {
    /// The integers `from..from + count`, keyed by value. Non-finite inputs
    /// and negative counts give an empty range; fractions are truncated.
    pub fn range(
        from: impl Fn() -> f64 + 'static,
        count: impl Fn() -> f64 + 'static,
        render: impl Fn(Item<i64>) -> Spec + 'static,
    ) -> Self {
        Self::identity(move || integer_range(from(), count()), render)
    }
}

/// `from`, `from + 1`, ... `count` values; empty on non-finite input.
pub fn integer_range(from: f64, count: f64) -> Vec<i64> {
    if !from.is_finite() || !count.is_finite() || count <= 0.0 {
        return Vec::new();
    }
    let start = from.trunc() as i64;
    let len = count.trunc() as i64;
    (0..len).map(|i| start.saturating_add(i)).collect()
}

impl<T, K> View for List<T, K>
where
    T: Clone + 'static,
    K: Hash + Eq + Clone + Debug + 'static,
{
    fn name(&self) -> &'static str {
        "List"
    }

    fn template(&mut self, _cx: &mut Cx<'_>) -> Result<Spec> {
        let values = (self.each)();
        let keys: Vec<K> = values.iter().map(|v| (self.key)(v)).collect();
        index_keys(&keys)?;
        let children = keys
            .iter()
            .zip(values)
            .map(|(key, value)| self.child_spec(key, value))
            .collect::<Vec<_>>();
        self.keys = keys;
        Ok(Spec::Fragment(children))
    }

    fn update_children(&mut self, cx: &mut Cx<'_>) -> Result<()> {
        let values = (self.each)();
        let new_keys: Vec<K> = values.iter().map(|v| (self.key)(v)).collect();
        let plan = plan(&self.keys, &new_keys)?;

        let mut ids: HashMap<K, ViewId> = self
            .keys
            .iter()
            .cloned()
            .zip(cx.children().iter().copied())
            .collect();

        // Removed keys, unmounted last to first.
        let removed: Vec<ViewId> = plan
            .removes
            .iter()
            .filter_map(|key| {
                self.items.remove(key);
                ids.remove(key)
            })
            .collect();
        cx.remove_children(&removed)?;

        // Inserts come back to front, so every anchor is already in place.
        let end = cx.last_node().ok_or_else(|| Error::InvalidTemplate {
            view: "List",
            reason: "missing end marker".into(),
        })?;
        let mut values: HashMap<K, T> = new_keys.iter().cloned().zip(values).collect();
        let mut fresh = HashSet::new();
        for insert in &plan.inserts {
            let anchor = match insert.before.as_ref().and_then(|k| ids.get(k)) {
                Some(&next) => cx.first_node_of(next).unwrap_or(end),
                None => end,
            };
            match ids.get(&insert.key) {
                Some(&id) => cx.move_child(id, anchor)?,
                None => {
                    let value = values
                        .remove(&insert.key)
                        .ok_or_else(|| Error::DuplicateKey(format!("{:?}", insert.key)))?;
                    let spec = self.child_spec(&insert.key, value);
                    let id = cx.build_child(spec, anchor)?;
                    ids.insert(insert.key.clone(), id);
                    fresh.insert(id);
                }
            }
        }

        let order: Vec<ViewId> = new_keys.iter().filter_map(|k| ids.get(k).copied()).collect();
        cx.set_children(order.clone());
        for (key, value) in values {
            if let Some(item) = self.items.get(&key) {
                item.set(value);
            }
        }
        self.keys = new_keys;

        for id in order {
            if !fresh.contains(&id) {
                cx.update(id)?;
            }
        }
        Ok(())
    }
}

/// Builder for [`List`]. `each`, `key` and `render` are all required.
pub struct ListBuilder<T, K> {
    each: Option<EachFn<T>>,
    key: Option<KeyFn<T, K>>,
    render: Option<RenderFn<T>>,
}

impl<T, K> ListBuilder<T, K>
where
    T: Clone + 'static,
    K: Hash + Eq + Clone + Debug + 'static,
{
    /// The items getter, re-read on every update.
    pub fn each(mut self, each: impl Fn() -> Vec<T> + 'static) -> Self {
        self.each = Some(Rc::new(each));
        self
    }

    /// Stable identity of an item. Keys must be unique within the list.
    pub fn key(mut self, key: impl Fn(&T) -> K + 'static) -> Self {
        self.key = Some(Rc::new(key));
        self
    }

    pub fn render(mut self, render: impl Fn(Item<T>) -> Spec + 'static) -> Self {
        self.render = Some(Rc::new(render));
        self
    }

    pub fn build(self) -> Result<Spec> {
        let each = self.each.ok_or_else(|| Error::props("List", "missing `each` getter"))?;
        let key = self.key.ok_or_else(|| Error::props("List", "missing `key` function"))?;
        let render = self
            .render
            .ok_or_else(|| Error::props("List", "missing `render` function"))?;
        Ok(Spec::view(List {
            each,
            key,
            render,
            keys: Vec::new(),
            items: HashMap::new(),
        }))
    }
}
