//! Logging setup for the binary and for hosts that want the same output.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
#[must_use]
pub const fn default_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Installs a stderr subscriber. `RUST_LOG` wins over `verbose`.
///
/// Does nothing if a global subscriber is already set.
pub fn init(verbose: bool) {
    let filter = default_filter(verbose);
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(fmt::layer().without_time().with_writer(std::io::stderr))
        .try_init();
}
