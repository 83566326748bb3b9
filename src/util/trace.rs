//! Installs a `tracing_subscriber` formatter for the
//! instrumented matching entry points, filtered by
//! the environment.
//!
//! An example environment is shown:
//! ```bash
//! RUST_LOG=waymatch=debug
//! ```

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialises the tracer, using tracing subscription.
/// This is optional, not calling this function will simply
/// not log traces.
///
/// Calling it a second time is a no-op.
pub fn initialize_tracer() {
    let fmt_layer = tracing_subscriber::fmt::layer().compact();

    // Initialise tracing with subscribers and environment filter
    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(fmt_layer);

    let _ = registry.try_init();
}
