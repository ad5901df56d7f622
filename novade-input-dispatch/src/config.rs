//! Dispatcher configuration, loaded from the `[input.dispatch]`-style TOML
//! table the compositor hands over, or defaulted.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{error, info};

/// What to do with a touch `Move` whose touch id has no captured surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedTouchMotion {
    /// Drop the motion as inconsistent input.
    Drop,
    /// Treat the motion as a `Down`: hit-test, capture, and deliver.
    #[default]
    ImplicitDown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    pub unmatched_touch_motion: UnmatchedTouchMotion,
    /// Log every dropped event at `debug` level. When `false`, drops are logged at `trace`.
    pub log_dropped_events: bool,
    /// Upper bound on simultaneously tracked touch contacts. A `Down` for a new
    /// touch id beyond this limit is dropped. Zero means unlimited.
    pub max_touch_points: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            unmatched_touch_motion: UnmatchedTouchMotion::default(),
            log_dropped_events: true,
            max_touch_points: 0,
        }
    }
}

impl DispatcherConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: DispatcherConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration from `path`. A missing file yields the defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        info!("DispatcherConfig: Attempting to load configuration from '{}'.", path.display());
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let config = Self::from_toml_str(&contents).map_err(|e| {
                    error!(
                        "DispatcherConfig: Failed to parse config file '{}': {}",
                        path.display(),
                        e
                    );
                    e
                })?;
                info!(
                    "DispatcherConfig: Successfully loaded and parsed from '{}'.",
                    path.display()
                );
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "DispatcherConfig: Config file '{}' not found. Using default configuration.",
                    path.display()
                );
                Ok(DispatcherConfig::default())
            }
            Err(e) => {
                error!("DispatcherConfig: Failed to read config file '{}': {}", path.display(), e);
                Err(ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // Multitouch slots are signed 32-bit ids; anything beyond that is a typo.
        if self.max_touch_points > i32::MAX as usize {
            return Err(ConfigError::ValidationError(format!(
                "max_touch_points must not exceed {}, got {}",
                i32::MAX,
                self.max_touch_points
            )));
        }
        Ok(())
    }
}
