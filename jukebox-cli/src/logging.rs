//! Logging bootstrap
//!
//! Structured logs go to stderr via `tracing-subscriber` so they never
//! interleave with command results on stdout. `RUST_LOG` overrides the
//! verbosity-derived default directive.

use tracing_subscriber::EnvFilter;

pub fn init(verbose: u8, quiet: bool) {
    let directive = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    // Ignores re-initialization so embedding and tests stay harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
