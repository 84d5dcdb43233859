//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never mix with listing output on stdout.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` overrides the verbosity flag.
pub fn init(verbose: bool) {
    let default_directives = if verbose {
        "castlink=debug,castlink_core=debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
