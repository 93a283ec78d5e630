//! Resource meta document
//!
//! A meta file describes one resource and, recursively, the sub-resources
//! it contains (sprite frames inside an atlas, clips inside an animation).
//! Sub-resources are keyed by name under `subMetas`.

use crate::error::MetaError;
use crate::flatten::{flatten, IdSet};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One node of a meta document tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Resource identifier; empty for container-only entries
    #[serde(default, deserialize_with = "null_as_default")]
    pub uuid: String,

    /// Meta format version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ver: Option<String>,

    /// Resource kind, e.g. `sprite` or `raw`
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Nested sub-resources by name
    #[serde(
        default,
        rename = "subMetas",
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub sub_metas: BTreeMap<String, Meta>,

    /// Every other field, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Meta {
    /// Create an entry with the given identifier and no sub-resources
    #[inline]
    #[must_use]
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            ..Self::default()
        }
    }

    /// Add a named sub-resource
    #[must_use]
    pub fn with_sub_meta(mut self, name: impl Into<String>, sub: Meta) -> Self {
        self.sub_metas.insert(name.into(), sub);
        self
    }

    /// Decode a meta document from raw bytes
    ///
    /// Nesting depth is unbounded; deep `subMetas` chains grow the stack
    /// on the heap instead of overflowing it.
    ///
    /// # Errors
    /// Returns [`MetaError::Decode`] if the bytes are not a JSON object or
    /// `uuid`/`subMetas` carry the wrong type.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, MetaError> {
        let mut json = serde_json::Deserializer::from_slice(bytes);
        json.disable_recursion_limit();
        let meta = Self::deserialize(serde_stacker::Deserializer::new(&mut json))?;
        json.end()?;
        Ok(meta)
    }

    /// All identifiers declared by this entry and its descendants
    #[inline]
    #[must_use]
    pub fn identifiers(&self) -> IdSet {
        flatten(Some(self))
    }

    /// Locate the sub-resource declaring `uuid`
    ///
    /// Returns the `/`-joined chain of sub-meta names leading to it; the
    /// empty string means the root itself declares `uuid`.
    #[must_use]
    pub fn find(&self, uuid: &str) -> Option<String> {
        let mut stack: Vec<(Vec<&str>, &Meta)> = vec![(Vec::new(), self)];
        while let Some((path, meta)) = stack.pop() {
            if !uuid.is_empty() && meta.uuid == uuid {
                return Some(path.join("/"));
            }
            for (name, sub) in meta.sub_metas.iter().rev() {
                let mut child = path.clone();
                child.push(name.as_str());
                stack.push((child, sub));
            }
        }
        None
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
