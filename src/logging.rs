//! Diagnostics setup.
//!
//! Diagnostics go to stderr through `tracing`, leaving stdout to the single
//! invocation line and the import binary's own output.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter directive: `--verbose` wins, then `RUST_LOG`, then `info`.
fn filter_directive(verbose: bool, rust_log: Option<&str>) -> String {
    match (verbose, rust_log) {
        (true, _) => "debug".to_string(),
        (false, Some(directive)) if !directive.trim().is_empty() => directive.to_string(),
        _ => "info".to_string(),
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(verbose: bool) {
    let directive = filter_directive(verbose, std::env::var("RUST_LOG").ok().as_deref());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
