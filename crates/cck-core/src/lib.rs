//! cckit Core - Resource Reference Search
//!
//! Ties meta documents and prefab graphs together:
//! - Loads search [`Target`]s from meta files and flattens their identifiers
//! - Discovers and decodes prefab documents, in parallel
//! - Finds every node referencing a target identifier ([`find_matches`])
//! - Renders matches as `<file>: <nearest named ancestor>`
//!
//! # Architecture
//!
//! ```text
//! .meta ──► Meta ──► flatten ──► Target ─┐
//!                                        ├──► find_matches ──► Match ──► format_match
//! .prefab ──► decode ──► Graph ──────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use cck_core::prelude::*;
//!
//! let source = FsSource;
//! let targets = load_targets(&["assets/hero.png"], &source)?;
//! let files = discover(&["assets"], &ScanConfig::default())?;
//! let documents = collect_documents(decode_all(&files, &source, &DecodeConfig::default(), true), false)?;
//!
//! for m in find_matches(&targets, &documents) {
//!     println!("{}", format_match(&m, targets.len() == 1));
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod batch;
pub mod config;
pub mod error;
pub mod format;
pub mod listing;
pub mod matcher;
pub mod scan;
pub mod source;
pub mod target;

// Re-exports for convenience
pub use batch::{collect_documents, decode_all, load_document, Decoded, Document};
pub use config::CckConfig;
pub use error::{CoreError, CoreResult};
pub use format::{format_location, format_match, resolve_name};
pub use listing::list_paths;
pub use matcher::{find_matches, find_matches_par, Location, Match};
pub use scan::{discover, ScanConfig};
pub use source::{DocumentSource, FsSource, MemorySource};
pub use target::{load_targets, Target};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for reference search
    pub use crate::{
        collect_documents, decode_all, discover, find_matches, format_match, load_targets,
        CckConfig, CoreError, Document, DocumentSource, FsSource, Match, ScanConfig, Target,
    };
    pub use cck_prefab::DecodeConfig;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
