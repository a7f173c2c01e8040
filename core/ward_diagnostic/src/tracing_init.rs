//! Optional `tracing` subscriber bootstrap.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Only installs a subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=ward=warn` to see diagnostics routed through [`TracingSink`]
/// or `RUST_LOG=ward_diagnostic=trace` for registry and dispatch activity.
///
/// [`TracingSink`]: crate::sink::TracingSink
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the host.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
