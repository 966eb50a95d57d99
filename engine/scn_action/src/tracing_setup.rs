//! Tracing subscriber setup for hosts and tests.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for dispatch and traversal diagnostics.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=scn_dispatch=debug` or `RUST_LOG=scn_action=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
