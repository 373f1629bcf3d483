//! Log output setup
//!
//! Logs go to stderr so stdout carries only the display. `RUST_LOG` takes
//! precedence over the `-q`/`-v` flags:
//! ```bash
//! RUST_LOG=tapcalc=trace tapcalc keys 17+25r=
//! ```

use std::sync::Once;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::Verbosity;

static INIT: Once = Once::new();

/// Builds the filter for a verbosity level, honouring `RUST_LOG`
#[must_use]
pub fn filter_for(verbosity: Verbosity) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(verbosity.filter_directive())
    }
}

/// Installs the stderr subscriber; only the first call takes effect
pub fn init(verbosity: Verbosity) {
    INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .without_time()
            .with_filter(filter_for(verbosity));

        // Another subscriber may already be installed by an embedding test harness.
        let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
    });
}
