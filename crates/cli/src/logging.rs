//! Tracing subscriber setup shared by the binaries

use tracing_subscriber::EnvFilter;

/// Log to stderr at `info`, or `debug` when verbose. `RUST_LOG` takes precedence.
pub fn init(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
