//! Logging setup for binaries and tests embedding the dispatcher.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Installs a minimal `tracing` subscriber writing to `stderr`.
///
/// Filters with `RUST_LOG`, defaulting to `info`. Does nothing if a global
/// subscriber is already installed.
pub fn init_minimal_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Like [`init_minimal_logging`] but routes output through the test harness
/// so it is captured per test.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::DEBUG.to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_initialization_is_harmless() {
        init_test_logging();
        init_minimal_logging();
        init_test_logging();
        tracing::info!("logging initialized twice without panicking");
    }
}
