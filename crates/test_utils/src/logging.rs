//! Tracing setup for tests
//!
//! Honors `RUST_LOG`; defaults to `warn` so passing suites stay quiet.

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};

static TRACING: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // another harness may already have installed a subscriber
    let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
});

/// Installs the test subscriber once per process
pub fn init_test_tracing() {
    Lazy::force(&TRACING);
}
