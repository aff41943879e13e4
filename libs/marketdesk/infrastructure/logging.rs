//! Logging initialization

use tracing_subscriber::EnvFilter;

/// Initialize tracing with a fallback level.
///
/// Logs go to stderr; stdout belongs to the binaries' output.
/// `RUST_LOG` still wins when set. Calling this twice is harmless; the
/// second subscriber is simply not installed.
pub fn init_tracing_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .try_init();
}
