//! Diagnostic output setup
//!
//! Diagnostics go to stderr; stdout carries only command results.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive for a `-v` count
#[must_use]
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber
///
/// With no `-v`, `RUST_LOG` is honoured and defaults to `warn`. Any `-v`
/// overrides it.
pub fn init(verbosity: u8) {
    let directive = default_directive(verbosity);
    let filter = if verbosity == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
    } else {
        EnvFilter::new(directive)
    };

    // Ignored if a subscriber is already set, as under test harnesses.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
