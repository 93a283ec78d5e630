//! cckit Prefab Graphs
//!
//! A prefab document is a flat JSON array. Every element is a record
//! (node, component, prefab info, ...) and every relationship between
//! records is an integer index into that same array:
//!
//! ```text
//! [ {"__type__": "cc.Prefab", "data": {"__id__": 1}},
//!   {"__type__": "cc.Node", "_name": "Root", "_parent": null,
//!    "_children": [{"__id__": 2}], "_components": [{"__id__": 3}]},
//!   {"__type__": "cc.Node", "_name": "Icon", "_parent": {"__id__": 1}},
//!   {"__type__": "cc.Sprite", "node": {"__id__": 1},
//!    "_spriteFrame": {"__uuid__": "41c8a1b3"}} ]
//! ```
//!
//! # Core Operations
//!
//! - **Decode**: [`decode`] parses the array and resolves every index into
//!   a [`NodeId`] handle, rejecting out-of-range references up front.
//! - **Rebuild**: [`tree::enumerate`] walks the child links from a node and
//!   yields every root-to-leaf [`NodePath`].
//!
//! Records live in a single arena owned by [`Graph`]; relations are plain
//! handles into it, so the decoded graph is immutable and `Send + Sync`.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod graph;
pub mod record;
pub mod tree;

// Re-exports for convenience
pub use config::DecodeConfig;
pub use error::{PrefabError, ReferenceError, ReferenceKind, TreeError};
pub use graph::{decode, decode_with, Graph, Node, NodeId};
pub use record::{IdRef, RawRecord, ResourceRef};
pub use tree::{enumerate, enumerate_root, Enumerate, NodePath};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with prefab graphs
    pub use crate::{
        decode, decode_with, enumerate, DecodeConfig, Graph, Node, NodeId, NodePath, PrefabError,
        ReferenceError, ReferenceKind, TreeError,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
