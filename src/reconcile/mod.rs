//! Keyed reconciliation: the LIS utility and the mutation planner built on it.

pub mod lis;
pub mod plan;

pub use lis::lis;
pub use plan::{index_keys, plan, Insert, MutationPlan};
