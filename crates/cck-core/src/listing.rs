//! Node path listing

use crate::batch::Document;
use crate::error::CoreError;
use cck_prefab::{enumerate_root, NodePath};

/// Every leaf path of a document's node tree, with `cut_head` leading
/// levels removed
///
/// Paths that become empty after the cut are dropped.
///
/// # Errors
/// [`CoreError::Tree`] if the document has no root or its children links
/// revisit a node.
pub fn list_paths(
    document: &Document,
    root_type: &str,
    cut_head: usize,
) -> Result<Vec<NodePath>, CoreError> {
    let tree_error = |source| CoreError::Tree {
        path: document.path.clone(),
        source,
    };

    let mut paths = Vec::new();
    for path in enumerate_root(&document.graph, root_type).map_err(tree_error)? {
        let path = path.map_err(tree_error)?.cut_head(cut_head);
        if !path.is_empty() {
            paths.push(path);
        }
    }

    tracing::debug!(path = %document.path.display(), leaves = paths.len(), "listed node paths");
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cck_prefab::decode;
    use cck_test_utils::{sample_prefab, PrefabBuilder};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn document(bytes: &[u8]) -> Document {
        Document {
            path: PathBuf::from("ui/panel.prefab"),
            graph: decode(bytes).unwrap(),
        }
    }

    fn rendered(paths: &[NodePath]) -> Vec<String> {
        paths.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn cuts_leading_levels() {
        let doc = document(&sample_prefab("a", "b"));

        assert_eq!(
            rendered(&list_paths(&doc, "cc.Node", 0).unwrap()),
            vec!["Canvas/Panel/Icon", "Canvas/Panel/Badge"]
        );
        assert_eq!(
            rendered(&list_paths(&doc, "cc.Node", 1).unwrap()),
            vec!["Panel/Icon", "Panel/Badge"]
        );
    }

    #[test]
    fn fully_cut_paths_are_dropped() {
        let doc = document(&sample_prefab("a", "b"));
        assert!(list_paths(&doc, "cc.Node", 3).unwrap().is_empty());
    }

    #[test]
    fn rootless_document_is_error() {
        let doc = document(br#"[{"__type__": "cc.Prefab"}]"#);
        let err = list_paths(&doc, "cc.Node", 1).unwrap_err();
        assert_eq!(err.to_string(), "ui/panel.prefab: no root node of type 'cc.Node'");
    }

    #[test]
    fn cycle_is_error() {
        let mut b = PrefabBuilder::new();
        let root = b.add_node("Root", None);
        let child = b.add_node("Child", Some(root));
        b.set(child, "_children", serde_json::json!([{ "__id__": root }]));
        let doc = document(&b.to_bytes());

        assert!(matches!(
            list_paths(&doc, "cc.Node", 0),
            Err(CoreError::Tree { .. })
        ));
    }
}
