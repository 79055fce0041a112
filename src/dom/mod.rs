//! Host document: slotmap-backed node arena the views render into.

pub mod event;
pub mod mutation;
pub mod node;
pub mod query;
pub mod tree;

pub use event::{Event, Listener, ListenerId};
pub use mutation::Mutation;
pub use node::{NodeData, NodeId, NodeKind};
pub use tree::Document;
