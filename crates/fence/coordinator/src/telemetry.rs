//! Tracing bootstrap for hosts embedding the fence.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a global subscriber honoring `RUST_LOG`, falling back to `debug`
/// when `verbose` is set and `info` otherwise.
///
/// Returns `false` if a subscriber was already installed.
pub fn init(verbose: bool) -> bool {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .try_init()
        .is_ok()
}
