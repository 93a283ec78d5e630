//! Search targets
//!
//! A target is one resource being searched for: the meta file describing
//! it plus every identifier that file declares, flattened.

use crate::error::CoreError;
use crate::source::DocumentSource;
use cck_meta::{IdSet, Meta};
use std::path::{Path, PathBuf};

/// Extension of resource meta files
pub const META_EXTENSION: &str = "meta";

/// A resource to search references for
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    /// Meta file the identifiers came from
    pub path: PathBuf,
    /// Every identifier of the resource and its sub-resources
    pub ids: IdSet,
    /// Parsed meta tree, kept for diagnostics
    pub meta: Option<Meta>,
}

impl Target {
    /// Build a target from a decoded meta tree
    #[must_use]
    pub fn from_meta(path: impl Into<PathBuf>, meta: Meta) -> Self {
        Self {
            path: path.into(),
            ids: meta.identifiers(),
            meta: Some(meta),
        }
    }

    /// Build a target from a bare identifier list
    #[must_use]
    pub fn from_ids<I, S>(path: impl Into<PathBuf>, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into(),
            ids: ids
                .into_iter()
                .map(Into::into)
                .filter(|id: &String| !id.is_empty())
                .collect(),
            meta: None,
        }
    }

    /// Load a target for a resource or meta path
    ///
    /// A path not ending in `.meta` names the resource itself; its meta
    /// file sits next to it with `.meta` appended.
    ///
    /// # Errors
    /// [`CoreError::Io`] if the meta file cannot be read,
    /// [`CoreError::Meta`] if it cannot be decoded.
    pub fn load(path: impl AsRef<Path>, source: &dyn DocumentSource) -> Result<Self, CoreError> {
        let path = meta_path(path.as_ref());
        let bytes = source
            .read(&path)
            .map_err(|e| CoreError::io_error(&path, e))?;
        let meta = Meta::from_slice(&bytes).map_err(|source| CoreError::Meta {
            path: path.clone(),
            source,
        })?;

        let target = Self::from_meta(path, meta);
        tracing::debug!(
            path = %target.path.display(),
            ids = target.ids.len(),
            "loaded target"
        );
        Ok(target)
    }

    /// Where in the meta tree `uuid` is declared, as a `/`-joined chain
    #[must_use]
    pub fn locate(&self, uuid: &str) -> Option<String> {
        self.meta.as_ref().and_then(|m| m.find(uuid))
    }
}

/// Meta file path for a resource or meta path
#[must_use]
pub fn meta_path(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == META_EXTENSION) {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(META_EXTENSION);
    PathBuf::from(name)
}

/// Load every target, stopping at the first failure
///
/// # Errors
/// The first error from [`Target::load`].
pub fn load_targets<P: AsRef<Path>>(
    paths: &[P],
    source: &dyn DocumentSource,
) -> Result<Vec<Target>, CoreError> {
    paths.iter().map(|p| Target::load(p, source)).collect()
}
