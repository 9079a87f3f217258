//! Tracing subscriber setup for the command-line binary

use tracing_subscriber::EnvFilter;

/// Log level directive for a `-v` repeat count
///
/// No flag keeps only warnings; each repeat adds one level down to trace.
pub const fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install a stderr subscriber; `RUST_LOG` overrides the verbosity flag
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("quadsplit={}", level_for_verbosity(verbose))));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
