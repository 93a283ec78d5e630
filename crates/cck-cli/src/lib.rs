//! cckit command line
//!
//! The `cckit` binary is a thin wrapper around [`run`]; everything it
//! does is reachable here so the commands can be driven from tests with
//! in-memory output buffers.
//!
//! ```text
//! cckit findref assets/ui/icons.png -s assets/prefabs
//! cckit lsnode assets/prefabs/shop.prefab --cut-head 0
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cli;
pub mod commands;
pub mod logging;

pub use cli::build_cli;
pub use commands::{findref, lsnode, run, FindRef, ListNodes, Outcome};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
