pub mod catalog;
pub mod stub;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Installs the test subscriber once per process. Controlled by
/// `RUST_LOG`, silent by default.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}
