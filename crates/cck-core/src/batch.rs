//! Batch document decoding
//!
//! Documents are independent, so decoding fans out over rayon's pool.
//! Each document keeps its own result: whether one failure aborts the run
//! is decided by [`collect_documents`], not here.

use crate::error::CoreError;
use crate::source::DocumentSource;
use cck_prefab::{decode_with, DecodeConfig, Graph};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// A decoded prefab document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Where the document was read from
    pub path: PathBuf,
    /// Its decoded graph
    pub graph: Graph,
}

/// Outcome of decoding one document of a batch
#[derive(Debug)]
pub struct Decoded {
    /// Document path
    pub path: PathBuf,
    /// Decoded graph or the reason it could not be produced
    pub result: Result<Graph, CoreError>,
}

/// Read and decode a single document
///
/// # Errors
/// [`CoreError::Io`] or [`CoreError::Prefab`], prefixed with `path`.
pub fn load_document(
    path: &Path,
    source: &dyn DocumentSource,
    config: &DecodeConfig,
) -> Result<Document, CoreError> {
    let bytes = source.read(path).map_err(|e| CoreError::io_error(path, e))?;
    let graph = decode_with(&bytes, config).map_err(|source| CoreError::Prefab {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), records = graph.len(), "decoded document");
    Ok(Document {
        path: path.to_path_buf(),
        graph,
    })
}

/// Decode every path, preserving input order
pub fn decode_all(
    paths: &[PathBuf],
    source: &dyn DocumentSource,
    config: &DecodeConfig,
    parallel: bool,
) -> Vec<Decoded> {
    let decode_one = |path: &PathBuf| Decoded {
        path: path.clone(),
        result: load_document(path, source, config).map(|doc| doc.graph),
    };

    if parallel {
        paths.par_iter().map(decode_one).collect()
    } else {
        paths.iter().map(decode_one).collect()
    }
}

/// Turn batch results into documents
///
/// With `keep_going`, failed documents are logged and skipped; otherwise
/// the first failure in input order is returned.
///
/// # Errors
/// The first document error when `keep_going` is false.
pub fn collect_documents(
    decoded: Vec<Decoded>,
    keep_going: bool,
) -> Result<Vec<Document>, CoreError> {
    let mut documents = Vec::with_capacity(decoded.len());
    let mut skipped = 0usize;

    for Decoded { path, result } in decoded {
        match result {
            Ok(graph) => documents.push(Document { path, graph }),
            Err(err) if keep_going => {
                tracing::warn!("skipping {err}");
                skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }

    if skipped > 0 {
        tracing::info!(decoded = documents.len(), skipped, "batch decoded with failures");
    }
    Ok(documents)
}
