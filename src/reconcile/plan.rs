//! Keyed-list mutation planner.
//!
//! Given the old and new key order of a list, computes which keys to remove
//! and which to (re)insert so that the fewest existing items move.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use super::lis::lis;
use crate::error::{Error, Result};

/// Place `key` immediately before `before`, or at the end when `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insert<K> {
    pub key: K,
    pub before: Option<K>,
}

/// Removes and inserts that turn an old key order into a new one.
///
/// Inserts are listed back to front: each one's anchor is either absent or
/// already in its final position when the insert is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationPlan<K> {
    pub removes: Vec<K>,
    pub inserts: Vec<Insert<K>>,
}

impl<K> MutationPlan<K> {
    /// `true` when the old order already equals the new one.
    pub fn is_empty(&self) -> bool {
        self.removes.is_empty() && self.inserts.is_empty()
    }
}

impl<K: PartialEq + Clone> MutationPlan<K> {
    /// Apply the plan to a plain key list: removes first, then each insert
    /// in order. Moves an existing key rather than duplicating it.
    pub fn apply(&self, old: &[K]) -> Vec<K> {
        let mut keys: Vec<K> = old
            .iter()
            .filter(|k| !self.removes.contains(k))
            .cloned()
            .collect();
        for insert in &self.inserts {
            if let Some(at) = keys.iter().position(|k| *k == insert.key) {
                keys.remove(at);
            }
            let at = insert
                .before
                .as_ref()
                .and_then(|b| keys.iter().position(|k| k == b))
                .unwrap_or(keys.len());
            keys.insert(at, insert.key.clone());
        }
        keys
    }
}

/// Index every key, failing on the first duplicate.
pub fn index_keys<K: Hash + Eq + Clone + Debug>(keys: &[K]) -> Result<HashMap<K, usize>> {
    let mut index = HashMap::with_capacity(keys.len());
    for (i, key) in keys.iter().enumerate() {
        if index.insert(key.clone(), i).is_some() {
            return Err(Error::DuplicateKey(format!("{key:?}")));
        }
    }
    Ok(index)
}

/// Plan the transformation of `old` into `new`.
///
/// Keys already in increasing relative order (the LIS of their new
/// positions) stay put; every other new key becomes an insert.
///
/// # Errors
///
/// [`Error::DuplicateKey`] if either list repeats a key.
pub fn plan<K: Hash + Eq + Clone + Debug>(old: &[K], new: &[K]) -> Result<MutationPlan<K>> {
    let new_index = index_keys(new)?;
    index_keys(old)?;

    let mut removes = Vec::new();
    let mut shared = Vec::new();
    for key in old {
        match new_index.get(key) {
            Some(&at) => shared.push(at),
            None => removes.push(key.clone()),
        }
    }

    let unmoved: HashSet<usize> = lis(&shared).into_iter().collect();
    let inserts = (0..new.len())
        .rev()
        .filter(|i| !unmoved.contains(i))
        .map(|i| Insert {
            key: new[i].clone(),
            before: new.get(i + 1).cloned(),
        })
        .collect::<Vec<_>>();

    tracing::trace!(
        removes = removes.len(),
        inserts = inserts.len(),
        unmoved = unmoved.len(),
        "planned keyed reconciliation"
    );
    Ok(MutationPlan { removes, inserts })
}
