//! Error types for cckit core
//!
//! Every document-level error carries the path it concerns, so a batch
//! failure can be reported as `<path>: <cause>`.

use cck_meta::MetaError;
use cck_prefab::{PrefabError, TreeError};
use std::path::PathBuf;

/// Main core error type
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Input bytes could not be obtained
    #[error("{}: {source}", .path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// Meta document could not be decoded
    #[error("{}: {source}", .path.display())]
    Meta {
        /// Meta file
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: MetaError,
    },

    /// Prefab document could not be decoded or has a dangling reference
    #[error("{}: {source}", .path.display())]
    Prefab {
        /// Prefab file
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: PrefabError,
    },

    /// Node tree could not be walked
    #[error("{}: {source}", .path.display())]
    Tree {
        /// Prefab file
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: TreeError,
    },

    /// Scope or exclude pattern is not a valid glob
    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        /// Offending pattern
        pattern: String,
        /// Underlying failure
        #[source]
        source: globset::Error,
    },

    /// Directory traversal failed
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Configuration file is invalid
    #[error("{}: invalid configuration: {message}", .path.display())]
    Config {
        /// Configuration file
        path: PathBuf,
        /// Parser message
        message: String,
    },
}

impl CoreError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Path of the document this error concerns, if any
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Io { path, .. }
            | Self::Meta { path, .. }
            | Self::Prefab { path, .. }
            | Self::Tree { path, .. }
            | Self::Config { path, .. } => Some(path),
            Self::Pattern { .. } | Self::Walk(_) => None,
        }
    }
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
