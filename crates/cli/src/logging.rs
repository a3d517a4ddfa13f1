//! Logging setup.
//!
//! Library crates log through the `log` facade; the subscriber installed
//! here bridges those records into `tracing` and writes them to stderr so
//! stdout stays clean for command output.
//!
//! `RUST_LOG` takes precedence over `-v` flags.

use tracing_subscriber::EnvFilter;

/// Default filter for a `-v` count: 0 = warn, 1 = debug, 2+ = trace.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // try_init: a second call (tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
