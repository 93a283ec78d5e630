//! Raw prefab records
//!
//! [`RawRecord`] is the untyped, unresolved form of one array element.
//! Only the relation and identity fields are interpreted; everything else
//! is carried through in [`RawRecord::payload`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Field holding a sprite's frame, the primary resource of a record
pub const SPRITE_FRAME_FIELD: &str = "_spriteFrame";

/// Key of a resource identifier inside a reference object
pub const UUID_KEY: &str = "__uuid__";

/// Index reference `{"__id__": n}`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdRef {
    /// Position of the referenced record; 0 means absent
    #[serde(rename = "__id__")]
    pub id: i64,
}

impl IdRef {
    /// Reference to position `id`
    #[inline]
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self { id }
    }
}

/// Reference to an external resource held by a record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    /// Field the reference was found in, e.g. `_spriteFrame`
    pub field: String,
    /// Referenced resource identifier
    pub uuid: String,
}

/// One element of a prefab document, before index resolution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Type tag, e.g. `cc.Node` or `cc.Sprite`
    #[serde(rename = "__type__", default, deserialize_with = "null_as_default")]
    pub type_tag: String,

    /// Node display name
    #[serde(rename = "_name", default, skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,

    /// Component display name
    #[serde(rename = "name", default, skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,

    /// Structural parent
    #[serde(rename = "_parent", default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<IdRef>,

    /// Ordered children
    #[serde(
        rename = "_children",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<IdRef>,

    /// Attached components
    #[serde(
        rename = "_components",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub components: Vec<IdRef>,

    /// Node a component is attached to
    #[serde(rename = "node", default, skip_serializing_if = "Option::is_none")]
    pub node: Option<IdRef>,

    /// Root of the prefab instance a `cc.PrefabInfo` describes
    #[serde(rename = "root", default, skip_serializing_if = "Option::is_none")]
    pub root: Option<IdRef>,

    /// Instance marker of a node
    #[serde(rename = "_prefab", default, skip_serializing_if = "Option::is_none")]
    pub prefab: Option<IdRef>,

    /// All remaining fields
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl RawRecord {
    /// Record of the given type and no relations
    #[must_use]
    pub fn new(type_tag: impl Into<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
            ..Self::default()
        }
    }

    /// Name used for display and diagnostics
    ///
    /// A non-empty `_name` wins over `name`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match (self.node_name.as_deref(), self.component_name.as_deref()) {
            (Some(name), _) if !name.is_empty() => name,
            (_, Some(name)) => name,
            (Some(name), None) => name,
            (None, None) => "",
        }
    }

    /// Raw owner index: `node` if set, else `root`
    #[must_use]
    pub fn owner(&self) -> i64 {
        match self.node {
            Some(IdRef { id }) if id != 0 => id,
            _ => self.root.map_or(0, |r| r.id),
        }
    }

    /// Every `{"__uuid__": ...}` reference among the payload fields
    ///
    /// Fields are scanned in key order; arrays of references are expanded
    /// in element order.
    #[must_use]
    pub fn resource_refs(&self) -> Vec<ResourceRef> {
        let mut refs = Vec::new();
        for (field, value) in &self.payload {
            match value {
                Value::Object(_) => {
                    if let Some(uuid) = uuid_of(value) {
                        refs.push(ResourceRef {
                            field: field.clone(),
                            uuid: uuid.to_string(),
                        });
                    }
                }
                Value::Array(items) => {
                    refs.extend(items.iter().filter_map(uuid_of).map(|uuid| ResourceRef {
                        field: field.clone(),
                        uuid: uuid.to_string(),
                    }));
                }
                _ => {}
            }
        }
        refs
    }
}

fn uuid_of(value: &Value) -> Option<&str> {
    value
        .get(UUID_KEY)
        .and_then(Value::as_str)
        .filter(|uuid| !uuid.is_empty())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
