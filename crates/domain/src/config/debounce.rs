use serde::{Deserialize, Serialize};

use super::duration::parse_duration;
use super::errors::ConfigError;
use std::time::Duration;

/// Per-source reply limiter for connectionless clients.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DebounceConfig {
    /// Window after a reply during which further replies to the same IP
    /// draw on the burst allowance.
    #[serde(default = "default_window")]
    pub window: String,

    /// Replies allowed inside one window before the IP is dropped.
    #[serde(default = "default_burst")]
    pub burst: u32,
}

impl DebounceConfig {
    pub fn window(&self) -> Result<Duration, ConfigError> {
        parse_duration(&self.window).map_err(|reason| ConfigError::InvalidDuration {
            field: "debounce",
            value: self.window.clone(),
            reason,
        })
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            burst: default_burst(),
        }
    }
}

fn default_window() -> String {
    "200ms".to_string()
}

fn default_burst() -> u32 {
    100
}
