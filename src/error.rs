//! Hard failures: contract violations that abort the triggering operation.
//!
//! Recoverable conditions never show up here; they go through the
//! [`WarningChannel`](crate::warning::WarningChannel) instead.

use crate::dom::NodeId;
use crate::view::ViewId;

/// Errors raised by mounting, updating and reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("host node {0:?} is not an element")]
    InvalidHost(NodeId),
    #[error("host node {0:?} is already mounted")]
    AlreadyMounted(NodeId),
    #[error("host node {0:?} was not mounted by this renderer")]
    NotMounted(NodeId),
    #[error("view `{view}` produced no template: {reason}")]
    InvalidTemplate { view: &'static str, reason: String },
    #[error("invalid props for `{component}`: {reason}")]
    InvalidProps {
        component: &'static str,
        reason: String,
    },
    #[error("duplicate key {0}")]
    DuplicateKey(String),
    #[error("attribute `{name}` expects {expected}")]
    InvalidAttribute {
        name: String,
        expected: &'static str,
    },
    #[error("view {0:?} does not exist")]
    UnknownView(ViewId),
    #[error("node {0:?} is not attached to a parent")]
    DetachedNode(NodeId),
    /// An application hook failed. The remaining hooks of that pass are skipped.
    #[error("hook `{hook}` of `{view}` failed: {message}")]
    Hook {
        view: &'static str,
        hook: &'static str,
        message: String,
    },
}

impl Error {
    /// Shorthand for [`Error::InvalidProps`].
    pub fn props(component: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidProps {
            component,
            reason: reason.into(),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;
