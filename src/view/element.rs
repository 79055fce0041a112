//! Elements: what a mounted spec became.

use super::renderer::ViewId;
use crate::dom::NodeId;

/// A mounted unit: one host node, a marker-bounded fragment, or a child view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Node(NodeId),
    /// Content lives between the two marker comments, so the range stays
    /// locatable while the content grows or shrinks.
    Fragment { start: NodeId, end: NodeId },
    /// The view's content is another view's content.
    View(ViewId),
}

impl Element {
    /// The marker or node this element starts at, without following views.
    pub fn own_first(self) -> Option<NodeId> {
        match self {
            Self::Node(node) | Self::Fragment { start: node, .. } => Some(node),
            Self::View(_) => None,
        }
    }

    pub fn own_last(self) -> Option<NodeId> {
        match self {
            Self::Node(node) | Self::Fragment { end: node, .. } => Some(node),
            Self::View(_) => None,
        }
    }
}
