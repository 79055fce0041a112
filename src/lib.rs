//! # weft
//!
//! A retained-mode reactive view framework. Views render once into a host
//! document and are then kept in sync by fine-grained updates: every reactive
//! attribute remembers its last value and writes only on change, and keyed
//! lists reconcile with a longest-increasing-subsequence planner that moves
//! as few nodes as possible.
//!
//! ## Core Systems
//!
//! - **[`dom`]**: Slotmap-backed host document with a mutation log
//! - **[`attr`]**: Attribute binding registry and built-in handlers
//! - **[`reconcile`]**: LIS utility and keyed mutation planner
//! - **[`view`]**: Specs, the `View` trait, renderer and lifecycle dispatcher
//! - **[`control`]**: Switch, List, Show/Hide, If/IfElse/IfDefined
//! - **[`testing`]**: Headless harness, probe view, HTML snapshots
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use weft::control::Show;
//! use weft::testing::Harness;
//! use weft::view::Spec;
//!
//! let open = Rc::new(Cell::new(false));
//! let mut harness = Harness::new();
//! let when = Rc::clone(&open);
//! harness
//!     .mount_spec(
//!         Spec::element("nav")
//!             .child(Show::when(move || when.get()).then(|| "menu".into()).build().unwrap())
//!             .build(),
//!     )
//!     .unwrap();
//! assert_eq!(harness.html(), "<nav></nav>");
//!
//! open.set(true);
//! harness.update().unwrap();
//! assert_eq!(harness.html(), "<nav>menu</nav>");
//! ```

// Foundation
pub mod config;
pub mod error;
pub mod warning;

// Core systems
pub mod attr;
pub mod dom;
pub mod reconcile;
pub mod view;

// Built on top
pub mod control;
pub mod testing;

pub use config::RendererConfig;
pub use error::{Error, Result};
pub use view::{Cx, Renderer, Spec, View, ViewId};
pub use warning::Warning;

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use weft_macros::view;
