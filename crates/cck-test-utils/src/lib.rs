//! Testing utilities for cckit workspace
//!
//! Builders for prefab and meta documents in their on-disk JSON shape.

#![allow(missing_docs)]

use serde_json::{json, Value};

/// Incrementally builds a prefab document
///
/// Record 0 is the `cc.Prefab` asset record pointing at record 1, as in
/// documents saved by the editor. Every `add_*` method returns the new
/// record's index and keeps parent/child and node/component links
/// consistent in both directions.
#[derive(Debug, Clone)]
pub struct PrefabBuilder {
    records: Vec<Value>,
}

impl Default for PrefabBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefabBuilder {
    pub fn new() -> Self {
        Self {
            records: vec![json!({
                "__type__": "cc.Prefab",
                "_name": "",
                "data": { "__id__": 1 },
            })],
        }
    }

    pub fn add_node(&mut self, name: &str, parent: Option<usize>) -> usize {
        let index = self.push(json!({
            "__type__": "cc.Node",
            "_name": name,
            "_objFlags": 0,
            "_parent": parent.map(|p| json!({ "__id__": p })),
            "_children": [],
            "_components": [],
            "_active": true,
        }));
        if let Some(p) = parent {
            self.link(p, "_children", index);
        }
        index
    }

    pub fn add_sprite(&mut self, node: usize, frame_uuid: &str) -> usize {
        let index = self.push(json!({
            "__type__": "cc.Sprite",
            "_name": "",
            "node": { "__id__": node },
            "_enabled": true,
            "_spriteFrame": { "__uuid__": frame_uuid },
        }));
        self.link(node, "_components", index);
        index
    }

    pub fn add_prefab_info(&mut self, node: usize, root: usize, asset_uuid: &str) -> usize {
        let index = self.push(json!({
            "__type__": "cc.PrefabInfo",
            "root": { "__id__": root },
            "asset": { "__uuid__": asset_uuid },
            "fileId": format!("file-{node}"),
            "sync": false,
        }));
        self.records[node]["_prefab"] = json!({ "__id__": index });
        index
    }

    pub fn add_record(&mut self, record: Value) -> usize {
        self.push(record)
    }

    pub fn set(&mut self, index: usize, field: &str, value: Value) {
        self.records[index][field] = value;
    }

    pub fn build(&self) -> Value {
        Value::Array(self.records.clone())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec_pretty(&self.build()).unwrap()
    }

    fn push(&mut self, record: Value) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    fn link(&mut self, owner: usize, field: &str, index: usize) {
        let list = &mut self.records[owner][field];
        if !list.is_array() {
            *list = json!([]);
        }
        if let Value::Array(items) = list {
            items.push(json!({ "__id__": index }));
        }
    }
}

/// A canvas with a panel holding two sprites, saved as a prefab instance
///
/// ```text
/// Canvas
/// └── Panel
///     ├── Icon   (sprite: icon_uuid)
///     └── Badge  (sprite: badge_uuid)
/// ```
pub fn sample_prefab(icon_uuid: &str, badge_uuid: &str) -> Vec<u8> {
    let mut b = PrefabBuilder::new();
    let canvas = b.add_node("Canvas", None);
    let panel = b.add_node("Panel", Some(canvas));
    let icon = b.add_node("Icon", Some(panel));
    let badge = b.add_node("Badge", Some(panel));
    b.add_sprite(icon, icon_uuid);
    b.add_sprite(badge, badge_uuid);
    b.add_prefab_info(canvas, canvas, "sample-prefab-asset");
    b.to_bytes()
}

/// A sprite meta document: one texture with named sprite frame sub-metas
pub fn sprite_meta(texture_uuid: &str, frames: &[(&str, &str)]) -> Vec<u8> {
    let sub_metas: serde_json::Map<String, Value> = frames
        .iter()
        .map(|(name, uuid)| {
            (
                (*name).to_string(),
                json!({
                    "ver": "1.0.4",
                    "uuid": uuid,
                    "rawTextureUuid": texture_uuid,
                    "trimType": "auto",
                    "subMetas": {},
                }),
            )
        })
        .collect();

    serde_json::to_vec_pretty(&json!({
        "ver": "2.3.5",
        "uuid": texture_uuid,
        "type": "sprite",
        "wrapMode": "clamp",
        "filterMode": "bilinear",
        "subMetas": sub_metas,
    }))
    .unwrap()
}
