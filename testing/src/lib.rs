pub use insta::assert_snapshot;
use tracing::level_filters::LevelFilter;

/// Installs a process-wide trace subscriber once per test binary.
///
/// `RUST_LOG` narrows the output when set; otherwise everything down to
/// `TRACE` is printed (and captured by the test harness).
pub fn logging() {
    use std::sync::Once;

    static ONCE: Once = Once::new();

    ONCE.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(LevelFilter::TRACE.to_string()));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
