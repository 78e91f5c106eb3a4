//! Console logging for the wrapper.
//!
//! Progress messages, tool stdout (info) and tool stderr (error) all go through
//! `tracing` and are written to stderr.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG` env var. Defaults to `info` if unset so tool output is
/// visible without configuration.
///
/// # Example
/// ```bash
/// RUST_LOG=tfmaint=debug tfmaint plan
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
