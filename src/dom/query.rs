//! Document queries: by id, class, tag; generic predicate matching.

use super::node::{NodeData, NodeId};
use super::tree::Document;

impl Document {
    /// Find the first node below `root` (inclusive, document order) whose
    /// `id` attribute matches.
    pub fn query_by_id(&self, root: NodeId, id: &str) -> Option<NodeId> {
        self.query_all(root, |data| data.id() == Some(id))
            .into_iter()
            .next()
    }

    /// Find all nodes below `root` that have the given class.
    pub fn query_by_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.query_all(root, |data| data.has_class(class))
    }

    /// Find all elements below `root` with the given tag.
    pub fn query_by_tag(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        self.query_all(root, |data| data.tag() == Some(tag))
    }

    /// Find all nodes below `root` matching an arbitrary predicate, in
    /// document order.
    pub fn query_all(&self, root: NodeId, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.walk_depth_first(root)
            .into_iter()
            .filter(|&id| self.get(id).is_some_and(&predicate))
            .collect()
    }
}
