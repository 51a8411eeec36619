//! Opt-in tracing output for tests.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a compact fmt subscriber filtered by `RUST_LOG` (default
/// `info`), writing through the test harness's captured output.
///
/// Safe to call from every test: only the first call installs anything.
pub fn init() {
    let fmt_layer = fmt::layer()
        .with_test_writer()
        .with_target(true)
        .with_level(true)
        .compact();

    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init();
}
