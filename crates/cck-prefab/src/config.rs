//! Decoder configuration

use serde::{Deserialize, Serialize};

/// Type tag of scene graph nodes in Cocos Creator documents
pub const NODE_TYPE: &str = "cc.Node";

/// Type tag of the record marking a node as a prefab instance root
pub const PREFAB_INFO_TYPE: &str = "cc.PrefabInfo";

/// Options controlling how a document's graph is interpreted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Type tag a record must carry to be selected as the graph root
    pub root_type: String,
    /// Type tag of the instance marker linked from the root's `_prefab`
    pub instance_marker_type: String,
}

impl DecodeConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a different root type tag
    #[inline]
    #[must_use]
    pub fn with_root_type(mut self, root_type: impl Into<String>) -> Self {
        self.root_type = root_type.into();
        self
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            root_type: NODE_TYPE.to_string(),
            instance_marker_type: PREFAB_INFO_TYPE.to_string(),
        }
    }
}
