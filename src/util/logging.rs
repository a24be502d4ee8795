//! Logging setup for the search binary.
//!
//! Logs go to stderr so that the terminal report on stdout stays clean.
//! `RUST_LOG` takes precedence over the level passed in.

use std::io;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Default level when neither `RUST_LOG` nor `--log-level` is given.
pub fn default_log_level() -> &'static str {
    "info"
}

/// Install the global tracing subscriber.
///
/// Returns `false` if a subscriber was already installed (e.g. by another test).
pub fn init_logging(level: &str) -> bool {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()
        .is_ok()
}
