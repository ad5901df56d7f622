//! Error types for the input dispatch crate.
//!
//! Per-event inconsistencies (a release with no matching press, an event with
//! no target) are never errors: they are dropped and logged. Only misuse of
//! the dispatcher's lifecycle and configuration problems surface here.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// `dispatch` was called before `start` or after `stop`.
    #[error("Input dispatcher is not running; call start() before dispatching events")]
    NotRunning,
}

/// Error type for loading and validating [`DispatcherConfig`](crate::config::DispatcherConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read input dispatch configuration from {path:?}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse input dispatch configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Input dispatch configuration validation failed: {0}")]
    ValidationError(String),
}
