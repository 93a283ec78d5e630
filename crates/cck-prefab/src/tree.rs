//! Node tree reconstruction
//!
//! Children links of a decoded [`Graph`] form a tree below its root. This
//! module walks that tree depth-first and yields one [`NodePath`] per leaf,
//! lazily, with an explicit stack.

use crate::error::TreeError;
use crate::graph::{Graph, NodeId};
use std::fmt;

/// Names from a start node down to a leaf, root first
///
/// Anonymous nodes keep their empty name as a segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath {
    segments: Vec<String>,
}

impl NodePath {
    /// Path from root-first segments
    #[must_use]
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// Segments, root first
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Segments, leaf first
    pub fn leaf_first(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().rev().map(String::as_str)
    }

    /// Number of segments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether no segments remain
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Drop the first `levels` segments
    #[must_use]
    pub fn cut_head(&self, levels: usize) -> Self {
        Self {
            segments: self.segments.iter().skip(levels).cloned().collect(),
        }
    }

    /// Consume into segments
    #[must_use]
    pub fn into_segments(self) -> Vec<String> {
        self.segments
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// Lazy depth-first enumeration of leaf paths
///
/// Created by [`enumerate`]. Yields paths in child order. If a node is
/// reached twice, through a cycle or because two parents list it, yields
/// a single [`TreeError::Revisited`] and stops.
#[derive(Debug, Clone)]
pub struct Enumerate<'g> {
    graph: &'g Graph,
    stack: Vec<Vec<NodeId>>,
    visited: Vec<bool>,
    failed: bool,
}

impl Iterator for Enumerate<'_> {
    type Item = Result<NodePath, TreeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        while let Some(chain) = self.stack.pop() {
            let id = *chain.last()?;
            if std::mem::replace(&mut self.visited[id.index()], true) {
                self.failed = true;
                self.stack.clear();
                let node = &self.graph[id];
                return Some(Err(TreeError::Revisited {
                    position: id.index(),
                    node_type: node.type_tag().to_string(),
                    node_name: node.name().to_string(),
                }));
            }

            let children = self.graph[id].children();
            if children.is_empty() {
                let segments = chain
                    .iter()
                    .map(|&n| self.graph[n].name().to_string())
                    .collect();
                return Some(Ok(NodePath::new(segments)));
            }

            for &child in children.iter().rev() {
                let mut next = chain.clone();
                next.push(child);
                self.stack.push(next);
            }
        }
        None
    }
}

/// Enumerate every leaf path below `start`
///
/// A leaf yields a path holding only its own name. The iterator borrows
/// the graph; call again to restart.
#[must_use]
pub fn enumerate(graph: &Graph, start: NodeId) -> Enumerate<'_> {
    Enumerate {
        graph,
        stack: vec![vec![start]],
        visited: vec![false; graph.len()],
        failed: false,
    }
}

/// Enumerate every leaf path below the graph root
///
/// # Errors
/// [`TreeError::NoRoot`] if the document has no root node.
pub fn enumerate_root<'g>(graph: &'g Graph, root_type: &str) -> Result<Enumerate<'g>, TreeError> {
    graph
        .root()
        .map(|root| enumerate(graph, root))
        .ok_or_else(|| TreeError::NoRoot(root_type.to_string()))
}
