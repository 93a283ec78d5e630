//! Decoder behaviour over generated and builder-made documents.

use cck_prefab::{decode, enumerate, PrefabError, ReferenceKind};
use cck_test_utils::{sample_prefab, PrefabBuilder};
use proptest::prelude::*;
use serde_json::json;

fn document(parents: &[i64], children: &[Vec<i64>]) -> Vec<u8> {
    let records: Vec<_> = parents
        .iter()
        .zip(children)
        .map(|(parent, kids)| {
            json!({
                "__type__": "cc.Node",
                "_parent": { "__id__": parent },
                "_children": kids.iter().map(|k| json!({ "__id__": k })).collect::<Vec<_>>(),
            })
        })
        .collect();
    serde_json::to_vec(&records).unwrap()
}

proptest! {
    #[test]
    fn prop_decode_accepts_exactly_in_range_indices(
        rows in proptest::collection::vec(
            (-3i64..12, proptest::collection::vec(-3i64..12, 0..3)),
            1..8,
        )
    ) {
        let (parents, children): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
        let len = i64::try_from(parents.len()).unwrap();
        let in_range = |i: &i64| *i == 0 || (0..len).contains(i);

        // First offender in document order, parent before children.
        let first_bad = parents.iter().zip(&children).find_map(|(p, kids)| {
            if !in_range(p) {
                Some((ReferenceKind::Parent, *p))
            } else {
                kids.iter().find(|k| !in_range(k)).map(|k| (ReferenceKind::Child, *k))
            }
        });

        match (decode(&document(&parents, &children)), first_bad) {
            (Ok(graph), None) => {
                prop_assert_eq!(graph.len(), parents.len());
                for (position, (id, node)) in graph.iter().enumerate() {
                    prop_assert_eq!(id.index(), position);
                    let expected_parent = usize::try_from(parents[position]).ok().filter(|&p| p != 0);
                    prop_assert_eq!(node.parent().map(|p| p.index()), expected_parent);
                }
            }
            (Err(PrefabError::Reference(err)), Some((kind, index))) => {
                prop_assert_eq!(err.kind, kind);
                prop_assert_eq!(err.index, index);
            }
            (other, expected) => {
                prop_assert!(false, "decode returned {:?}, expected offender {:?}", other.map(|g| g.len()), expected);
            }
        }
    }
}

#[test]
fn sample_prefab_lists_leaf_paths() {
    let graph = decode(&sample_prefab("icon", "badge")).unwrap();
    let root = graph.root().unwrap();

    let paths: Vec<String> = enumerate(&graph, root)
        .map(|p| p.unwrap().to_string())
        .collect();
    assert_eq!(paths, vec!["Canvas/Panel/Icon", "Canvas/Panel/Badge"]);
}

#[test]
fn sample_prefab_marks_instance_root() {
    let graph = decode(&sample_prefab("icon", "badge")).unwrap();
    let marker = graph.instance_marker().unwrap();
    assert_eq!(graph[marker].type_tag(), "cc.PrefabInfo");
    assert_eq!(graph[marker].owner(), graph.root());
    assert_eq!(graph[marker].resource(), None);
    assert_eq!(
        graph[marker].resources().iter().map(|r| r.uuid.as_str()).collect::<Vec<_>>(),
        vec!["sample-prefab-asset"]
    );
}

#[test]
fn component_links_resolve_both_ways() {
    let mut b = PrefabBuilder::new();
    let root = b.add_node("Root", None);
    let sprite = b.add_sprite(root, "frame");
    let graph = decode(&b.to_bytes()).unwrap();

    let root_id = graph.node_id(root).unwrap();
    let sprite_id = graph.node_id(sprite).unwrap();
    assert_eq!(graph[root_id].components(), &[sprite_id]);
    assert_eq!(graph[sprite_id].owner(), Some(root_id));
    assert_eq!(graph[sprite_id].payload()["_enabled"], true);
}

#[test]
fn dangling_component_names_node() {
    let mut b = PrefabBuilder::new();
    let root = b.add_node("Root", None);
    b.set(root, "_components", json!([{ "__id__": 40 }]));

    let err = decode(&b.to_bytes()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "component:40 not found for node cc.Node:Root (record #1)"
    );
}
