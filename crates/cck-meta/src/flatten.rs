//! Identifier tree flattening
//!
//! Walks a [`Meta`] tree with an explicit stack, so arbitrarily deep
//! documents never exhaust the call stack.

use crate::meta::Meta;
use indexmap::IndexSet;

/// Insertion-ordered, duplicate-free set of resource identifiers
pub type IdSet = IndexSet<String>;

/// Collect every non-empty identifier reachable from `root`
///
/// Pre-order: an entry's own identifier comes before those of its
/// sub-resources, and sub-resources are visited in name order. A `None`
/// root yields an empty set.
#[must_use]
pub fn flatten(root: Option<&Meta>) -> IdSet {
    let mut ids = IdSet::new();
    let Some(root) = root else {
        return ids;
    };

    let mut stack = vec![root];
    while let Some(meta) = stack.pop() {
        if !meta.uuid.is_empty() {
            ids.insert(meta.uuid.clone());
        }
        stack.extend(meta.sub_metas.values().rev());
    }
    ids
}
