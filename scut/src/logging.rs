//! Diagnostic logging, written to stderr so stdout only ever carries data.
//!
//! Verbosity follows `RUST_LOG` (e.g. `RUST_LOG=scut=debug`) and defaults to
//! `warn`, which reports truncated lines only.

use std::io::{self, IsTerminal};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_layer = fmt::layer()
        .compact()
        .with_target(false)
        .without_time()
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .with_filter(filter);

    // Ignore a subscriber that is already installed
    let _ = tracing_subscriber::registry().with(stderr_layer).try_init();
}
