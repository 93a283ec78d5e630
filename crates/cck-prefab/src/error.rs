//! Error types for prefab decoding and tree traversal

use std::fmt;

/// Which relation field held a bad index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// `_parent`
    Parent,
    /// An entry of `_children`
    Child,
    /// An entry of `_components`
    Component,
    /// `node` or `root`
    Owner,
    /// `_prefab`
    Prefab,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReferenceKind::Parent => "parent",
            ReferenceKind::Child => "child",
            ReferenceKind::Component => "component",
            ReferenceKind::Owner => "owner",
            ReferenceKind::Prefab => "prefab",
        };
        f.write_str(name)
    }
}

/// A relation index that does not address a record of the same document
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}:{index} not found for node {node_type}:{node_name} (record #{position})")]
pub struct ReferenceError {
    /// Relation the index was read from
    pub kind: ReferenceKind,
    /// The offending index, verbatim
    pub index: i64,
    /// Position of the record holding the reference
    pub position: usize,
    /// Type tag of that record
    pub node_type: String,
    /// Display name of that record
    pub node_name: String,
}

/// Errors while decoding a prefab document
#[derive(Debug, thiserror::Error)]
pub enum PrefabError {
    /// Not a JSON array of records
    #[error("malformed prefab document: {0}")]
    Decode(#[from] serde_json::Error),

    /// A relation points outside the document
    #[error(transparent)]
    Reference(#[from] ReferenceError),
}

/// Errors while walking the node tree
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The document has no record selectable as root
    #[error("no root node of type '{0}'")]
    NoRoot(String),

    /// A node was reached a second time through child links
    ///
    /// Raised for cycles and for a child listed under two parents alike.
    #[error("node {node_type}:{node_name} (record #{position}) reached twice")]
    Revisited {
        /// Position of the revisited record
        position: usize,
        /// Its type tag
        node_type: String,
        /// Its display name
        node_name: String,
    },
}
