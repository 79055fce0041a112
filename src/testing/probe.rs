//! `Probe`: a view that records every hook it receives.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::view::{Cx, Hook, Spec, View};

/// Shared log of `"label.hook"` entries.
#[derive(Debug, Clone, Default)]
pub struct ProbeLog(Rc<RefCell<Vec<String>>>);

impl ProbeLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, entry: String) {
        self.0.borrow_mut().push(entry);
    }

    /// Drain the entries recorded so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    /// How many times `label` received `hook`.
    pub fn count(&self, label: &str, hook: Hook) -> usize {
        let entry = format!("{label}.{hook}");
        self.0.borrow().iter().filter(|e| **e == entry).count()
    }
}

/// Records `init`, `template` and every lifecycle hook into a [`ProbeLog`],
/// then renders `<div data-probe="label">` around its content.
pub struct Probe {
    label: &'static str,
    log: ProbeLog,
    content: Vec<Spec>,
    fail_on: Option<Hook>,
}

impl Probe {
    pub fn new(label: &'static str, log: &ProbeLog) -> Self {
        Self {
            label,
            log: log.clone(),
            content: Vec::new(),
            fail_on: None,
        }
    }

    pub fn child(mut self, spec: impl Into<Spec>) -> Self {
        self.content.push(spec.into());
        self
    }

    /// Make `hook` return an error.
    pub fn fail_on(mut self, hook: Hook) -> Self {
        self.fail_on = Some(hook);
        self
    }

    fn record(&self, hook: Hook) -> Result<()> {
        self.log.push(format!("{}.{hook}", self.label));
        if self.fail_on == Some(hook) {
            return Err(Error::Hook {
                view: self.label,
                hook: hook.as_str(),
                message: "probe failure".into(),
            });
        }
        Ok(())
    }
}

impl View for Probe {
    fn name(&self) -> &'static str {
        self.label
    }

    fn init(&mut self, _cx: &mut Cx<'_>) -> Result<()> {
        self.log.push(format!("{}.init", self.label));
        Ok(())
    }

    fn template(&mut self, _cx: &mut Cx<'_>) -> Result<Spec> {
        self.log.push(format!("{}.template", self.label));
        Ok(Spec::element("div")
            .attr("data-probe", self.label)
            .children(std::mem::take(&mut self.content))
            .build())
    }

    fn will_mount(&mut self, _cx: &mut Cx<'_>) -> Result<()> {
        self.record(Hook::WillMount)
    }

    fn on_mount(&mut self, _cx: &mut Cx<'_>) -> Result<()> {
        self.record(Hook::OnMount)
    }

    fn did_mount(&mut self, _cx: &mut Cx<'_>) -> Result<()> {
        self.record(Hook::DidMount)
    }

    fn will_unmount(&mut self, _cx: &mut Cx<'_>) -> Result<()> {
        self.record(Hook::WillUnmount)
    }

    fn on_unmount(&mut self, _cx: &mut Cx<'_>) -> Result<()> {
        self.record(Hook::OnUnmount)
    }

    fn did_unmount(&mut self, _cx: &mut Cx<'_>) -> Result<()> {
        self.record(Hook::DidUnmount)
    }

    fn will_update(&mut self, _cx: &mut Cx<'_>) -> Result<()> {
        self.record(Hook::WillUpdate)
    }

    fn on_update(&mut self, _cx: &mut Cx<'_>) -> Result<()> {
        self.record(Hook::OnUpdate)
    }

    fn did_update(&mut self, _cx: &mut Cx<'_>) -> Result<()> {
        self.record(Hook::DidUpdate)
    }
}
