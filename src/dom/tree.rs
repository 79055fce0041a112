//! The host document: insert, detach, destroy, attributes, listeners, walk.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use super::event::{Event, Listener, ListenerId};
use super::mutation::Mutation;
use super::node::{NodeData, NodeId, NodeKind};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// The host document tree, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Parent/child relationships are stored
/// in secondary maps so that detaching is O(siblings) and lookup is O(1).
/// Nodes may exist without a parent (freshly created or detached); they stay
/// in the arena until [`destroy`](Self::destroy)ed.
pub struct Document {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    listeners: SecondaryMap<NodeId, Vec<(ListenerId, String, Listener)>>,
    next_listener: u64,
    focused: Option<NodeId>,
    recording: bool,
    log: Vec<Mutation>,
}

impl Document {
    /// Create an empty document. Mutations are not recorded.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            listeners: SecondaryMap::new(),
            next_listener: 0,
            focused: None,
            recording: false,
            log: Vec::new(),
        }
    }

    /// Create an empty document that records every mutation.
    pub fn recording() -> Self {
        let mut doc = Self::new();
        doc.set_record_mutations(true);
        doc
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        id
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(NodeData::element(tag))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeData::new(NodeKind::Text(text.into())))
    }

    /// Create a detached comment node.
    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeData::new(NodeKind::Comment(text.into())))
    }

    /// Create an empty staging fragment.
    pub fn create_fragment(&mut self) -> NodeId {
        self.alloc(NodeData::new(NodeKind::Fragment))
    }

    /// Insert `node` into `parent` immediately before `reference`, or at the
    /// end when `reference` is `None`.
    ///
    /// A node that already has a parent is moved. A fragment is not inserted
    /// itself: its children are moved over in order and it is left empty.
    ///
    /// # Panics
    ///
    /// Panics (debug) if `parent` does not exist or `reference` is not one of
    /// its children.
    pub fn insert_before(&mut self, parent: NodeId, node: NodeId, reference: Option<NodeId>) {
        debug_assert!(self.nodes.contains_key(parent), "parent node does not exist");
        debug_assert!(
            reference.map_or(true, |r| self.parent(r) == Some(parent)),
            "reference node is not a child of parent"
        );

        if matches!(self.kind(node), Some(NodeKind::Fragment)) {
            let moved = self
                .children
                .get_mut(node)
                .map(std::mem::take)
                .unwrap_or_default();
            for child in moved {
                self.parent.remove(child);
                self.place(parent, child, reference);
            }
            return;
        }

        if reference == Some(node) {
            return;
        }
        self.unlink(node);
        self.place(parent, node, reference);
    }

    /// Append `node` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, node: NodeId) {
        self.insert_before(parent, node, None);
    }

    fn place(&mut self, parent: NodeId, node: NodeId, reference: Option<NodeId>) {
        let Some(siblings) = self.children.get_mut(parent) else {
            return;
        };
        let index = reference
            .and_then(|r| siblings.iter().position(|&c| c == r))
            .unwrap_or(siblings.len());
        siblings.insert(index, node);
        self.parent.insert(node, parent);
        self.record(Mutation::Insert { parent, node });
    }

    /// Remove `node` from its parent's child list without logging.
    fn unlink(&mut self, node: NodeId) -> bool {
        let Some(parent) = self.parent.remove(node) else {
            return false;
        };
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.retain(|&child| child != node);
        }
        true
    }

    /// Detach `node` (and its subtree) from its parent. The nodes stay alive.
    pub fn detach(&mut self, node: NodeId) {
        if self.unlink(node) {
            self.record(Mutation::Detach { node });
        }
        if let Some(focused) = self.focused {
            if focused == node || self.ancestors(focused).contains(&node) {
                self.focused = None;
            }
        }
    }

    /// Detach a node and free it together with all its descendants.
    ///
    /// Returns the `NodeData` for the removed node, or `None` if it didn't exist.
    pub fn destroy(&mut self, id: NodeId) -> Option<NodeData> {
        if !self.nodes.contains_key(id) {
            return None;
        }
        self.detach(id);

        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed_root_data = None;

        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            self.parent.remove(current);
            self.listeners.remove(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed_root_data = data;
            }
        }

        removed_root_data
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Returns an empty slice if the node has no
    /// children or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// The sibling immediately after `id`.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let index = siblings.iter().position(|&c| c == id)?;
        siblings.get(index + 1).copied()
    }

    /// The contiguous sibling run from `first` to `last`, inclusive.
    ///
    /// Returns just `[first]` when `last` is not a later sibling of `first`.
    pub fn sibling_range(&self, first: NodeId, last: NodeId) -> Vec<NodeId> {
        let Some(parent) = self.parent(first) else {
            return vec![first];
        };
        let siblings = self.children(parent);
        let Some(start) = siblings.iter().position(|&c| c == first) else {
            return vec![first];
        };
        match siblings[start..].iter().position(|&c| c == last) {
            Some(len) => siblings[start..=start + len].to_vec(),
            None => vec![first],
        }
    }

    /// Walk from `id` up to the root, collecting ancestor node ids.
    ///
    /// The returned vec does **not** include `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// The kind of a node.
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id).map(|data| &data.kind)
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(NodeData::is_element)
    }

    /// Number of nodes alive in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the document contains a node with the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    // ── Content ──────────────────────────────────────────────────────

    /// Text of a text or comment node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Text(text) | NodeKind::Comment(text) => Some(text),
            _ => None,
        }
    }

    /// Replace the text of a text or comment node.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        let text = text.into();
        if let Some(NodeKind::Text(current) | NodeKind::Comment(current)) =
            self.nodes.get_mut(id).map(|data| &mut data.kind)
        {
            current.clone_from(&text);
            self.record(Mutation::SetText { node: id, text });
        }
    }

    /// Read an attribute. `class` reads the joined class list.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.nodes.get(id)?.attribute(name)
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// Write an attribute. Writing `class` replaces the whole class list.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        let Some(data) = self.nodes.get_mut(id) else {
            return;
        };
        if name == "class" {
            data.classes.clear();
            for token in value.split_whitespace() {
                data.add_class(token);
            }
        } else {
            data.attributes.insert(name.to_owned(), value.to_owned());
        }
        self.record(Mutation::SetAttribute {
            node: id,
            name: name.to_owned(),
            value: value.to_owned(),
        });
    }

    /// Remove an attribute. No-op (and no log entry) if it was absent.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        let Some(data) = self.nodes.get_mut(id) else {
            return;
        };
        let removed = if name == "class" {
            let had = !data.classes.is_empty();
            data.classes.clear();
            had
        } else {
            data.attributes.remove(name).is_some()
        };
        if removed {
            self.record(Mutation::RemoveAttribute {
                node: id,
                name: name.to_owned(),
            });
        }
    }

    /// The class list of a node.
    pub fn class_list(&self, id: NodeId) -> &[String] {
        self.nodes
            .get(id)
            .map(|data| data.classes.as_slice())
            .unwrap_or(&[])
    }

    /// Add a class. Logged only when the list actually changed.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if self.nodes.get_mut(id).is_some_and(|data| data.add_class(class)) {
            self.record(Mutation::AddClass {
                node: id,
                class: class.to_owned(),
            });
        }
    }

    /// Remove a class. Logged only when the list actually changed.
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if self
            .nodes
            .get_mut(id)
            .is_some_and(|data| data.remove_class(class))
        {
            self.record(Mutation::RemoveClass {
                node: id,
                class: class.to_owned(),
            });
        }
    }

    // ── Listeners and focus ──────────────────────────────────────────

    /// Attach a listener for events of type `event`.
    pub fn add_listener(&mut self, id: NodeId, event: &str, listener: Listener) -> ListenerId {
        let handle = ListenerId(self.next_listener);
        self.next_listener += 1;
        if !self.listeners.contains_key(id) {
            self.listeners.insert(id, Vec::new());
        }
        if let Some(list) = self.listeners.get_mut(id) {
            list.push((handle, event.to_owned(), listener));
            self.record(Mutation::AddListener {
                node: id,
                event: event.to_owned(),
            });
        }
        handle
    }

    /// Detach a listener. Returns `false` if it was not attached to `id`.
    pub fn remove_listener(&mut self, id: NodeId, handle: ListenerId) -> bool {
        let Some(list) = self.listeners.get_mut(id) else {
            return false;
        };
        let Some(index) = list.iter().position(|(h, ..)| *h == handle) else {
            return false;
        };
        let (_, event, _) = list.remove(index);
        self.record(Mutation::RemoveListener { node: id, event });
        true
    }

    /// Number of listeners attached to `id` for `event`.
    pub fn listener_count(&self, id: NodeId, event: &str) -> usize {
        self.listeners
            .get(id)
            .map_or(0, |list| list.iter().filter(|(_, e, _)| e == event).count())
    }

    /// Deliver `event` to its target, then to each ancestor (bubble order).
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch(&self, event: &Event) -> usize {
        if !self.contains(event.target) {
            return 0;
        }
        let mut path = vec![event.target];
        path.extend(self.ancestors(event.target));

        let mut invoked = 0;
        for node in path {
            let matching: Vec<Listener> = self
                .listeners
                .get(node)
                .map(|list| {
                    list.iter()
                        .filter(|(_, kind, _)| *kind == event.kind)
                        .map(|(_, _, l)| l.clone())
                        .collect()
                })
                .unwrap_or_default();
            for listener in matching {
                listener.call(event);
                invoked += 1;
            }
        }
        invoked
    }

    /// Move focus to `id`.
    pub fn focus(&mut self, id: NodeId) {
        if self.contains(id) {
            self.focused = Some(id);
            self.record(Mutation::Focus { node: id });
        }
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    // ── Mutation log ─────────────────────────────────────────────────

    /// Turn the mutation log on or off. Turning it off drops what was
    /// recorded.
    pub fn set_record_mutations(&mut self, on: bool) {
        self.recording = on;
        if !on {
            self.log = Vec::new();
        }
    }

    pub fn records_mutations(&self) -> bool {
        self.recording
    }

    fn record(&mut self, mutation: Mutation) {
        if self.recording {
            self.log.push(mutation);
        }
    }

    /// Drain and return every mutation recorded so far.
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.log)
    }

    /// Mutations recorded since the last drain.
    pub fn mutations(&self) -> &[Mutation] {
        &self.log
    }

    // ── Traversal ────────────────────────────────────────────────────

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    /// Build a small test tree:
    /// ```text
    ///       body
    ///      /    \
    ///    a        b
    ///   / \
    ///  c   d
    /// ```
    fn build_tree() -> (Document, NodeId, NodeId, NodeId, NodeId, NodeId) {
        let mut doc = Document::recording();
        let body = doc.create_element("body");
        let a = doc.create_element("section");
        let b = doc.create_element("aside");
        let c = doc.create_element("button");
        let d = doc.create_text("label");
        doc.append_child(body, a);
        doc.append_child(body, b);
        doc.append_child(a, c);
        doc.append_child(a, d);
        doc.take_mutations();
        (doc, body, a, b, c, d)
    }

    #[test]
    fn append_builds_parent_relationship() {
        let (doc, body, a, b, c, d) = build_tree();
        assert_eq!(doc.children(body), &[a, b]);
        assert_eq!(doc.children(a), &[c, d]);
        assert_eq!(doc.parent(c), Some(a));
        assert_eq!(doc.parent(body), None);
    }

    #[test]
    fn insert_before_reference() {
        let (mut doc, body, a, b, ..) = build_tree();
        let e = doc.create_element("nav");
        doc.insert_before(body, e, Some(b));
        assert_eq!(doc.children(body), &[a, e, b]);
        assert_eq!(doc.take_mutations(), vec![Mutation::Insert { parent: body, node: e }]);
    }

    #[test]
    fn insert_moves_existing_child() {
        let (mut doc, body, a, b, ..) = build_tree();
        doc.insert_before(body, b, Some(a));
        assert_eq!(doc.children(body), &[b, a]);
    }

    #[test]
    fn fragment_insert_moves_children() {
        let (mut doc, body, a, b, ..) = build_tree();
        let frag = doc.create_fragment();
        let x = doc.create_text("x");
        let y = doc.create_text("y");
        doc.append_child(frag, x);
        doc.append_child(frag, y);
        doc.insert_before(body, frag, Some(b));
        assert_eq!(doc.children(body), &[a, x, y, b]);
        assert!(doc.children(frag).is_empty());
        assert_eq!(doc.parent(x), Some(body));
    }

    #[test]
    fn next_sibling_and_range() {
        let (mut doc, body, a, b, ..) = build_tree();
        let e = doc.create_element("footer");
        doc.append_child(body, e);
        assert_eq!(doc.next_sibling(a), Some(b));
        assert_eq!(doc.next_sibling(e), None);
        assert_eq!(doc.sibling_range(a, e), vec![a, b, e]);
        assert_eq!(doc.sibling_range(b, b), vec![b]);
        assert_eq!(doc.sibling_range(e, a), vec![e]);
    }

    #[test]
    fn detach_keeps_node_alive() {
        let (mut doc, body, a, b, c, _d) = build_tree();
        doc.detach(a);
        assert_eq!(doc.children(body), &[b]);
        assert!(doc.contains(a));
        assert_eq!(doc.parent(c), Some(a));
        assert_eq!(doc.take_mutations(), vec![Mutation::Detach { node: a }]);
    }

    #[test]
    fn destroy_subtree() {
        let (mut doc, body, a, b, c, d) = build_tree();
        doc.destroy(a);
        assert!(!doc.contains(a));
        assert!(!doc.contains(c));
        assert!(!doc.contains(d));
        assert_eq!(doc.children(body), &[b]);
        assert_eq!(doc.len(), 2);
        assert!(doc.destroy(a).is_none());
    }

    #[test]
    fn set_text_on_text_node() {
        let (mut doc, .., d) = build_tree();
        doc.set_text(d, "changed");
        assert_eq!(doc.text(d), Some("changed"));
    }

    #[test]
    fn attributes_round_trip() {
        let (mut doc, _, a, ..) = build_tree();
        doc.set_attribute(a, "title", "hello");
        assert_eq!(doc.attribute(a, "title").as_deref(), Some("hello"));
        doc.remove_attribute(a, "title");
        assert!(!doc.has_attribute(a, "title"));
        doc.remove_attribute(a, "title");
        assert_eq!(doc.take_mutations().len(), 2);
    }

    #[test]
    fn class_attribute_maps_to_class_list() {
        let (mut doc, _, a, ..) = build_tree();
        doc.set_attribute(a, "class", "x  y x");
        assert_eq!(doc.class_list(a), &["x".to_string(), "y".to_string()]);
        doc.remove_class(a, "x");
        assert_eq!(doc.attribute(a, "class").as_deref(), Some("y"));
    }

    #[test]
    fn class_changes_log_only_deltas() {
        let (mut doc, _, a, ..) = build_tree();
        doc.add_class(a, "on");
        doc.add_class(a, "on");
        doc.remove_class(a, "off");
        assert_eq!(
            doc.take_mutations(),
            vec![Mutation::AddClass { node: a, class: "on".into() }]
        );
    }

    #[test]
    fn mutation_log_is_opt_in() {
        let mut doc = Document::new();
        assert!(!doc.records_mutations());
        let p = doc.create_element("p");
        let text = doc.create_text("0");
        doc.append_child(p, text);
        for n in 1..=1000 {
            doc.set_text(text, n.to_string());
            doc.set_attribute(p, "data-n", &n.to_string());
        }
        assert!(doc.mutations().is_empty());

        doc.set_record_mutations(true);
        doc.set_text(text, "on");
        assert_eq!(doc.mutations().len(), 1);
        doc.set_record_mutations(false);
        assert!(doc.mutations().is_empty());
    }

    #[test]
    fn dispatch_bubbles_to_ancestors() {
        let (mut doc, body, a, _b, c, _d) = build_tree();
        let hits = Rc::new(Cell::new(0));
        for node in [c, a, body] {
            let hits = Rc::clone(&hits);
            doc.add_listener(node, "click", Listener::new(move |_| hits.set(hits.get() + 1)));
        }
        doc.add_listener(c, "keydown", Listener::new(|_| panic!("wrong event type")));
        assert_eq!(doc.dispatch(&Event::new("click", c)), 3);
        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn remove_listener_stops_delivery() {
        let (mut doc, .., c, _d) = build_tree();
        let handle = doc.add_listener(c, "click", Listener::new(|_| {}));
        assert_eq!(doc.listener_count(c, "click"), 1);
        assert!(doc.remove_listener(c, handle));
        assert!(!doc.remove_listener(c, handle));
        assert_eq!(doc.dispatch(&Event::new("click", c)), 0);
    }

    #[test]
    fn detaching_clears_focus_inside() {
        let (mut doc, _, a, _b, c, _d) = build_tree();
        doc.focus(c);
        assert_eq!(doc.focused(), Some(c));
        doc.detach(a);
        assert_eq!(doc.focused(), None);
    }

    #[test]
    fn walk_depth_first() {
        let (doc, body, a, b, c, d) = build_tree();
        assert_eq!(doc.walk_depth_first(body), vec![body, a, c, d, b]);
    }

    #[test]
    fn default_impl() {
        let doc = Document::default();
        assert!(doc.is_empty());
    }
}
