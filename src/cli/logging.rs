//! Tracing subscriber setup for the binary

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "face_recorder=info,warn";
const VERBOSE_FILTER: &str = "face_recorder=debug,warn";

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks between the info and
/// debug defaults. Logs go to stderr so stdout stays machine readable.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let installed = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();

    if installed.is_ok() {
        tracing::debug!(version = env!("CARGO_PKG_VERSION"), "logging initialized");
    }
}
