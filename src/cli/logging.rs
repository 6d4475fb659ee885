//! Logging initialization

use tracing_subscriber::EnvFilter;

/// Default filter directive for the given debug flag
pub fn default_directive(debug: bool) -> &'static str {
    if debug { "debug" } else { "info" }
}

/// Initialize logging to stderr
///
/// `RUST_LOG` takes precedence over the debug flag. Stdout stays reserved for
/// command output such as completion scripts and image overlay paths.
pub fn init_logging(debug: bool) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive(debug))),
        )
        .with_target(debug)
        .with_file(debug)
        .with_line_number(debug)
        .without_time()
        .init();
}
