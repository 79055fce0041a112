//! Renderer configuration.

/// Configuration for a [`Renderer`](crate::view::Renderer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererConfig {
    /// Re-read constant getters on update and warn when their value changed.
    /// The DOM is never touched by this check. Off by default: constant
    /// getters are otherwise never invoked again after mount.
    pub check_constants: bool,
    /// Record every fired lifecycle hook for later inspection.
    pub record_lifecycle: bool,
    /// Log warnings through `tracing` in addition to the registered handlers.
    pub log_warnings: bool,
    /// Keep a log of every document write, drained with
    /// [`Document::take_mutations`](crate::dom::Document::take_mutations).
    /// Off by default: nothing else drains it.
    pub record_mutations: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            check_constants: false,
            record_lifecycle: false,
            log_warnings: true,
            record_mutations: false,
        }
    }
}

impl RendererConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable constant-change diagnostics (builder).
    pub fn with_check_constants(mut self, on: bool) -> Self {
        self.check_constants = on;
        self
    }

    /// Enable or disable lifecycle recording (builder).
    pub fn with_record_lifecycle(mut self, on: bool) -> Self {
        self.record_lifecycle = on;
        self
    }

    /// Enable or disable warning logging (builder).
    pub fn with_log_warnings(mut self, on: bool) -> Self {
        self.log_warnings = on;
        self
    }

    /// Enable or disable the document mutation log (builder).
    pub fn with_record_mutations(mut self, on: bool) -> Self {
        self.record_mutations = on;
        self
    }
}
