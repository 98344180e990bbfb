//! Client configuration.
//!
//! Native hosts pass this as a JSON string through the FFI; Rust callers
//! build it directly.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_SPLASH_MIN_MS: u64 = 3000;

/// When the startup loading state ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadingPolicy {
    /// Purely on elapsed time. The first render may happen before the
    /// initial fetch has completed.
    #[default]
    Timer,
    /// Elapsed time and the initial fetch having settled.
    TimerAndFetch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub base_url: String,
    #[serde(default = "default_splash_min_ms")]
    pub splash_min_ms: u64,
    #[serde(default)]
    pub loading_policy: LoadingPolicy,
}

fn default_splash_min_ms() -> u64 {
    DEFAULT_SPLASH_MIN_MS
}

impl Config {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim().to_string(),
            splash_min_ms: DEFAULT_SPLASH_MIN_MS,
            loading_policy: LoadingPolicy::default(),
        }
    }

    /// Parse and validate. Surrounding whitespace in `base_url` is dropped.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let mut config: Config = serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.base_url = config.base_url.trim().to_string();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::Invalid("base_url must not be empty".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "base_url must start with http:// or https://, got {url}"
            )));
        }
        Ok(())
    }

    pub fn splash_min(&self) -> Duration {
        Duration::from_millis(self.splash_min_ms)
    }
}
