//! Logging configuration
//!
//! Initializes tracing for the command line tool.

/// Initializes logging with the specified level
///
/// `RUST_LOG` takes precedence when set. Output goes to stderr so command
/// output on stdout stays machine-readable.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A subscriber may already be installed, e.g. by a test harness.
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
