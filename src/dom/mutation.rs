//! Mutation log: every write the document accepts, in order, while recording is on.

use super::node::NodeId;

/// One recorded host-document write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Insert { parent: NodeId, node: NodeId },
    Detach { node: NodeId },
    SetText { node: NodeId, text: String },
    SetAttribute { node: NodeId, name: String, value: String },
    RemoveAttribute { node: NodeId, name: String },
    AddClass { node: NodeId, class: String },
    RemoveClass { node: NodeId, class: String },
    AddListener { node: NodeId, event: String },
    RemoveListener { node: NodeId, event: String },
    Focus { node: NodeId },
}

impl Mutation {
    /// The node the mutation touched.
    pub fn node(&self) -> NodeId {
        match self {
            Self::Insert { node, .. }
            | Self::Detach { node }
            | Self::SetText { node, .. }
            | Self::SetAttribute { node, .. }
            | Self::RemoveAttribute { node, .. }
            | Self::AddClass { node, .. }
            | Self::RemoveClass { node, .. }
            | Self::AddListener { node, .. }
            | Self::RemoveListener { node, .. }
            | Self::Focus { node } => *node,
        }
    }

    /// Whether this mutation changed tree structure (insert/detach).
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Insert { .. } | Self::Detach { .. })
    }
}
