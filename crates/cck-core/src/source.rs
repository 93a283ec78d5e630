//! Document sources
//!
//! The search core never opens files itself; it asks a [`DocumentSource`]
//! for the bytes behind a path.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Resolves a path to document bytes
///
/// Implementations must be shareable across decoding threads.
pub trait DocumentSource: Send + Sync {
    /// Read the whole document at `path`
    ///
    /// # Errors
    /// Any I/O failure, surfaced unchanged.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Reads documents from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl DocumentSource for FsSource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// Serves documents from memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemorySource {
    /// Create empty source
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a document at `path`
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, bytes);
        self
    }

    /// Add or replace a document
    pub fn insert(&mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), bytes.into());
    }
}

impl DocumentSource for MemorySource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such document: {}", path.display()),
            )
        })
    }
}
