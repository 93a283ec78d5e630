//! Decoded prefab graph
//!
//! [`Graph`] owns every [`Node`] of one document in document order. All
//! relations are [`NodeId`] handles into that arena, resolved and range
//! checked once by [`decode`]; nothing is mutated afterwards.

use crate::config::DecodeConfig;
use crate::error::{PrefabError, ReferenceError, ReferenceKind};
use crate::record::{IdRef, RawRecord, ResourceRef, SPRITE_FRAME_FIELD};
use serde_json::{Map, Value};
use std::fmt;
use std::ops::Index;

/// Handle of a record inside its [`Graph`]
///
/// The wrapped value is the record's position in the source array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position in the source document
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A resolved record
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    type_tag: String,
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    components: Vec<NodeId>,
    owner: Option<NodeId>,
    prefab: Option<NodeId>,
    resources: Vec<ResourceRef>,
    payload: Map<String, Value>,
}

impl Node {
    /// Type tag
    #[inline]
    #[must_use]
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// Display name, possibly empty
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Structural parent
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in listed order
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Attached components in listed order
    #[inline]
    #[must_use]
    pub fn components(&self) -> &[NodeId] {
        &self.components
    }

    /// Owner-root link: the node a component belongs to, or the instance
    /// root a prefab info describes
    #[inline]
    #[must_use]
    pub fn owner(&self) -> Option<NodeId> {
        self.owner
    }

    /// Instance marker linked from `_prefab`
    #[inline]
    #[must_use]
    pub fn prefab(&self) -> Option<NodeId> {
        self.prefab
    }

    /// Payload identifier: the `_spriteFrame` reference, if the record
    /// carries one
    ///
    /// Other references (materials, a prefab info's `asset`) are listed by
    /// [`Node::resources`] but are not the record's payload.
    #[must_use]
    pub fn resource(&self) -> Option<&ResourceRef> {
        self.resources.iter().find(|r| r.field == SPRITE_FRAME_FIELD)
    }

    /// Every external resource reference
    #[inline]
    #[must_use]
    pub fn resources(&self) -> &[ResourceRef] {
        &self.resources
    }

    /// Uninterpreted fields
    #[inline]
    #[must_use]
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }
}

/// All records of one document, with resolved relations
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    instance_marker: Option<NodeId>,
}

impl Graph {
    /// Resolve raw records into a graph
    ///
    /// Records are checked in document order, and within a record in the
    /// order parent, children, components, owner, prefab. Index 0 means
    /// "no relation" everywhere; list entries equal to 0 are skipped.
    ///
    /// # Errors
    /// Returns the first [`ReferenceError`] encountered.
    pub fn from_records(
        records: Vec<RawRecord>,
        config: &DecodeConfig,
    ) -> Result<Self, ReferenceError> {
        let len = records.len();
        let mut nodes = Vec::with_capacity(len);

        for (position, record) in records.into_iter().enumerate() {
            let check = |kind: ReferenceKind, raw: i64| resolve(kind, raw, len, position, &record);
            let check_all = |kind: ReferenceKind, refs: &[IdRef]| -> Result<Vec<NodeId>, ReferenceError> {
                let mut ids = Vec::with_capacity(refs.len());
                for r in refs {
                    if let Some(id) = check(kind, r.id)? {
                        ids.push(id);
                    }
                }
                Ok(ids)
            };

            let parent = check(ReferenceKind::Parent, record.parent.map_or(0, |r| r.id))?;
            let children = check_all(ReferenceKind::Child, &record.children)?;
            let components = check_all(ReferenceKind::Component, &record.components)?;
            let owner = check(ReferenceKind::Owner, record.owner())?;
            let prefab = check(ReferenceKind::Prefab, record.prefab.map_or(0, |r| r.id))?;
            let resources = record.resource_refs();
            let name = record.display_name().to_string();

            nodes.push(Node {
                type_tag: record.type_tag,
                name,
                parent,
                children,
                components,
                owner,
                prefab,
                resources,
                payload: record.payload,
            });
        }

        let root = nodes
            .iter()
            .position(|n| n.parent.is_none() && n.type_tag == config.root_type)
            .map(NodeId);
        let instance_marker = root
            .and_then(|r| nodes[r.0].prefab)
            .filter(|m| nodes[m.0].type_tag == config.instance_marker_type);

        if root.is_none() {
            tracing::debug!(records = len, root_type = %config.root_type, "document has no root node");
        }

        Ok(Self {
            nodes,
            root,
            instance_marker,
        })
    }

    /// Number of records, including the conventional unused record 0
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document had no records at all
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First parentless record of the configured root type
    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Prefab info marking the root as an instance of a prefab resource
    #[inline]
    #[must_use]
    pub fn instance_marker(&self) -> Option<NodeId> {
        self.instance_marker
    }

    /// Handle for the record at `index`, if in range
    #[inline]
    #[must_use]
    pub fn node_id(&self, index: usize) -> Option<NodeId> {
        (index < self.nodes.len()).then_some(NodeId(index))
    }

    /// Look up a node
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// All nodes in document order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }
}

impl Index<NodeId> for Graph {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

fn resolve(
    kind: ReferenceKind,
    raw: i64,
    len: usize,
    position: usize,
    record: &RawRecord,
) -> Result<Option<NodeId>, ReferenceError> {
    if raw == 0 {
        return Ok(None);
    }
    match usize::try_from(raw) {
        Ok(index) if index < len => Ok(Some(NodeId(index))),
        _ => Err(ReferenceError {
            kind,
            index: raw,
            position,
            node_type: record.type_tag.clone(),
            node_name: record.display_name().to_string(),
        }),
    }
}

/// Decode a prefab document with the default configuration
///
/// # Errors
/// [`PrefabError::Decode`] if the bytes are not a JSON array of objects,
/// [`PrefabError::Reference`] if any relation index is out of range.
pub fn decode(bytes: &[u8]) -> Result<Graph, PrefabError> {
    decode_with(bytes, &DecodeConfig::default())
}

/// Decode a prefab document
///
/// # Errors
/// See [`decode`].
pub fn decode_with(bytes: &[u8], config: &DecodeConfig) -> Result<Graph, PrefabError> {
    let records: Vec<RawRecord> = serde_json::from_slice(bytes)?;
    Ok(Graph::from_records(records, config)?)
}
