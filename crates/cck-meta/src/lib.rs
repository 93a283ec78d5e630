//! cckit Meta Documents
//!
//! Decoding of resource `.meta` documents and flattening of their nested
//! `subMetas` tree into a single identifier set.
//!
//! # Example
//!
//! ```rust
//! use cck_meta::{flatten, Meta};
//!
//! let meta = Meta::from_slice(br#"{
//!     "uuid": "atlas",
//!     "subMetas": { "hero": { "uuid": "hero-frame" } }
//! }"#).unwrap();
//!
//! let ids = flatten(Some(&meta));
//! assert_eq!(ids.len(), 2);
//! assert!(ids.contains("hero-frame"));
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod flatten;
pub mod meta;

// Re-exports
pub use error::MetaError;
pub use flatten::{flatten, IdSet};
pub use meta::Meta;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
