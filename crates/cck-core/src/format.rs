//! Match rendering
//!
//! A matched record is often an anonymous component; it is displayed
//! under the name of its nearest named ancestor.

use crate::matcher::{Location, Match};
use cck_prefab::{Graph, NodeId};
use std::fmt;

/// Name of the nearest named node at or above `node`
///
/// Walks the owner link when present (a component's node, a prefab
/// info's instance root), else the structural parent, until a non-empty
/// name is found. Returns `""` when the walk runs out of links.
#[must_use]
pub fn resolve_name(graph: &Graph, node: NodeId) -> &str {
    let mut current = node;
    // A well-formed document never needs more steps than it has records.
    for _ in 0..=graph.len() {
        let n = &graph[current];
        if !n.name().is_empty() {
            return n.name();
        }
        match n.owner().or(n.parent()) {
            Some(next) => current = next,
            None => break,
        }
    }
    ""
}

/// `<file name>: <resolved name>`
#[must_use]
pub fn format_location(location: &Location<'_>) -> String {
    location.to_string()
}

/// A match line, prefixed with the target path unless only one target
/// was searched
#[must_use]
pub fn format_match(found: &Match<'_>, single_target: bool) -> String {
    if single_target {
        format_location(&found.location)
    } else {
        format!("{}: {}", found.target.path.display(), found.location)
    }
}

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = self
            .path
            .file_name()
            .map_or_else(|| self.path.to_string_lossy(), |name| name.to_string_lossy());
        write!(f, "{}: {}", file, resolve_name(self.graph, self.node))
    }
}
