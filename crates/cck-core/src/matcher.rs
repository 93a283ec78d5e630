//! Reference matching
//!
//! Emission order is part of the contract: documents in the order given,
//! nodes in document order within each, targets in the order given for
//! each node. Display code groups output by document relying on it.

use crate::batch::Document;
use crate::target::Target;
use cck_prefab::{Graph, Node, NodeId};
use rayon::prelude::*;
use std::path::Path;

/// A node inside a specific document
#[derive(Debug, Clone, Copy)]
pub struct Location<'a> {
    /// Document path
    pub path: &'a Path,
    /// Document graph
    pub graph: &'a Graph,
    /// The node
    pub node: NodeId,
}

impl<'a> Location<'a> {
    /// The located record
    #[inline]
    #[must_use]
    pub fn record(&self) -> &'a Node {
        &self.graph[self.node]
    }
}

/// A node referencing one of a target's identifiers
#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    /// Target whose identifier was found
    pub target: &'a Target,
    /// Where it was found
    pub location: Location<'a>,
}

impl Match<'_> {
    /// The payload identifier that matched
    #[must_use]
    pub fn uuid(&self) -> Option<&str> {
        self.location
            .record()
            .resource()
            .filter(|r| self.target.ids.contains(&r.uuid))
            .map(|r| r.uuid.as_str())
    }
}

fn matches_in<'a>(targets: &'a [Target], document: &'a Document) -> Vec<Match<'a>> {
    let mut found = Vec::new();
    for (id, node) in document.graph.iter() {
        let Some(payload) = node.resource() else {
            continue;
        };
        for target in targets {
            if target.ids.contains(&payload.uuid) {
                found.push(Match {
                    target,
                    location: Location {
                        path: &document.path,
                        graph: &document.graph,
                        node: id,
                    },
                });
            }
        }
    }
    found
}

/// Find every node referencing any target identifier
#[must_use]
pub fn find_matches<'a>(targets: &'a [Target], documents: &'a [Document]) -> Vec<Match<'a>> {
    let found: Vec<_> = documents
        .iter()
        .flat_map(|doc| matches_in(targets, doc))
        .collect();
    tracing::info!(documents = documents.len(), targets = targets.len(), matches = found.len(), "search finished");
    found
}

/// Same as [`find_matches`], with documents searched in parallel
///
/// The result is identical, including order.
#[must_use]
pub fn find_matches_par<'a>(targets: &'a [Target], documents: &'a [Document]) -> Vec<Match<'a>> {
    let per_document: Vec<Vec<Match<'a>>> = documents
        .par_iter()
        .map(|doc| matches_in(targets, doc))
        .collect();
    let found: Vec<_> = per_document.into_iter().flatten().collect();
    tracing::info!(documents = documents.len(), targets = targets.len(), matches = found.len(), "search finished");
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use cck_prefab::decode;
    use cck_test_utils::{sample_prefab, PrefabBuilder};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn document(path: &str, bytes: &[u8]) -> Document {
        Document {
            path: PathBuf::from(path),
            graph: decode(bytes).unwrap(),
        }
    }

    fn summary(found: &[Match<'_>]) -> Vec<(String, String, usize)> {
        found
            .iter()
            .map(|m| {
                (
                    m.target.path.display().to_string(),
                    m.location.path.display().to_string(),
                    m.location.node.index(),
                )
            })
            .collect()
    }

    #[test]
    fn shared_identifier_matches_once_per_target() {
        let mut b = PrefabBuilder::new();
        let root = b.add_node("Root", None);
        let sprite = b.add_sprite(root, "X");
        let docs = vec![document("one.prefab", &b.to_bytes())];
        let targets = vec![
            Target::from_ids("first.meta", ["X", "Y"]),
            Target::from_ids("second.meta", ["Z", "X"]),
        ];

        let found = find_matches(&targets, &docs);
        assert_eq!(
            summary(&found),
            vec![
                ("first.meta".to_string(), "one.prefab".to_string(), sprite),
                ("second.meta".to_string(), "one.prefab".to_string(), sprite),
            ]
        );
        assert_eq!(found[0].uuid(), Some("X"));
    }

    #[test]
    fn no_matching_node_is_empty_not_error() {
        let docs = vec![document("a.prefab", &sample_prefab("a", "b"))];
        let targets = vec![Target::from_ids("t.meta", ["nothing"])];
        assert!(find_matches(&targets, &docs).is_empty());
        assert!(find_matches(&[], &docs).is_empty());
        assert!(find_matches(&targets, &[]).is_empty());
    }

    #[test]
    fn node_with_several_hits_matches_target_once() {
        let mut b = PrefabBuilder::new();
        let root = b.add_node("Root", None);
        let sprite = b.add_sprite(root, "frame");
        b.set(sprite, "_materials", serde_json::json!([{ "__uuid__": "frame" }, { "__uuid__": "mat" }]));
        let docs = vec![document("a.prefab", &b.to_bytes())];
        let targets = vec![Target::from_ids("t.meta", ["frame", "mat"])];

        assert_eq!(find_matches(&targets, &docs).len(), 1);
    }

    #[test]
    fn only_the_payload_identifier_is_compared() {
        let mut b = PrefabBuilder::new();
        let root = b.add_node("Root", None);
        let sprite = b.add_sprite(root, "frame-a");
        b.set(sprite, "_materials", serde_json::json!([{ "__uuid__": "mat-x" }]));
        b.add_prefab_info(root, root, "root-asset");
        let docs = vec![document("a.prefab", &b.to_bytes())];

        let materials = vec![Target::from_ids("mat.meta", ["mat-x"])];
        assert!(find_matches(&materials, &docs).is_empty());

        let assets = vec![Target::from_ids("root.prefab.meta", ["root-asset"])];
        assert!(find_matches(&assets, &docs).is_empty());

        let frames = vec![Target::from_ids("a.png.meta", ["mat-x", "frame-a"])];
        let found = find_matches(&frames, &docs);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].location.node.index(), sprite);
        assert_eq!(found[0].uuid(), Some("frame-a"));
    }

    #[test]
    fn order_is_document_then_node_then_target() {
        let docs = vec![
            document("a.prefab", &sample_prefab("icon", "badge")),
            document("b.prefab", &sample_prefab("badge", "icon")),
        ];
        let targets = vec![
            Target::from_ids("badge.meta", ["badge"]),
            Target::from_ids("icon.meta", ["icon"]),
        ];

        let found = find_matches(&targets, &docs);
        let order: Vec<_> = found
            .iter()
            .map(|m| {
                (
                    m.location.path.display().to_string(),
                    m.target.path.display().to_string(),
                )
            })
            .collect();
        assert_eq!(
            order,
            vec![
                ("a.prefab".to_string(), "icon.meta".to_string()),
                ("a.prefab".to_string(), "badge.meta".to_string()),
                ("b.prefab".to_string(), "badge.meta".to_string()),
                ("b.prefab".to_string(), "icon.meta".to_string()),
            ]
        );
    }

    #[test]
    fn parallel_search_is_identical() {
        let docs: Vec<_> = (0..16)
            .map(|i| document(&format!("d{i}.prefab"), &sample_prefab(&format!("u{}", i % 3), "shared")))
            .collect();
        let targets = vec![
            Target::from_ids("shared.meta", ["shared"]),
            Target::from_ids("u1.meta", ["u1"]),
        ];

        assert_eq!(
            summary(&find_matches(&targets, &docs)),
            summary(&find_matches_par(&targets, &docs))
        );
    }
}
