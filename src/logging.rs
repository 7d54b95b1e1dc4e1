//! Tracing subscriber setup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV: &str = "FOMEZERO_LOG";

/// Install a stderr `fmt` subscriber.
///
/// `FOMEZERO_LOG` wins over `level`; an unparsable `level` falls back to
/// `info`.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
