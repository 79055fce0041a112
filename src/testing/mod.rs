//! Headless testing helpers: Harness, Probe, snapshot serialization.
//!
//! Use the [`Harness`] to mount views on a fresh document and drive them
//! without a host environment. Use [`render_to_string`] to capture markup for
//! snapshot-style assertions, and [`Probe`] to observe hook order.

pub mod harness;
pub mod probe;
pub mod snapshot;

pub use harness::Harness;
pub use probe::{Probe, ProbeLog};
pub use snapshot::{render_node, render_to_string, render_with_markers};
