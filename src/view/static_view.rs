//! `Static`: a view around a fixed spec.

use super::context::Cx;
use super::spec::Spec;
use super::traits::View;
use crate::error::{Error, Result};

/// Renders a spec exactly once. Reactive getters inside the spec still
/// refresh on update; the structure never changes.
#[derive(Debug)]
pub struct Static {
    spec: Option<Spec>,
}

impl Static {
    pub fn new(spec: impl Into<Spec>) -> Self {
        Self {
            spec: Some(spec.into()),
        }
    }
}

impl View for Static {
    fn name(&self) -> &'static str {
        "Static"
    }

    fn template(&mut self, _cx: &mut Cx<'_>) -> Result<Spec> {
        self.spec.take().ok_or_else(|| Error::InvalidTemplate {
            view: "Static",
            reason: "template already consumed".into(),
        })
    }
}
