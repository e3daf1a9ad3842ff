use tracing_subscriber::EnvFilter;

/// Install a test-friendly subscriber once per process. `RUST_LOG` overrides
/// the default `warn` filter.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // another subscriber may already be installed by the test binary
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}
