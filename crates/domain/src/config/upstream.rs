use serde::{Deserialize, Serialize};

use super::duration::parse_duration;
use super::errors::ConfigError;
use crate::upstream_route::UpstreamSpec;
use std::time::Duration;

/// Used when no upstream is configured at all.
pub const DEFAULT_UPSTREAM: &str = "tcp-tls://1.1.1.1:853";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Ordered `[domain=]protocol://host:port` specs.
    #[serde(default)]
    pub servers: Vec<String>,

    /// Per-exchange timeout; zero means no timeout.
    #[serde(default = "default_client_timeout")]
    pub client_timeout: String,
}

impl UpstreamConfig {
    pub fn specs(&self) -> Result<Vec<UpstreamSpec>, ConfigError> {
        if self.servers.is_empty() {
            let spec = DEFAULT_UPSTREAM.parse().map_err(ConfigError::InvalidUpstream)?;
            return Ok(vec![spec]);
        }

        self.servers
            .iter()
            .map(|s| {
                s.parse::<UpstreamSpec>()
                    .map_err(|e| ConfigError::InvalidUpstream(format!("'{}': {}", s, e)))
            })
            .collect()
    }

    pub fn client_timeout(&self) -> Result<Option<Duration>, ConfigError> {
        let timeout = parse_duration(&self.client_timeout).map_err(|reason| {
            ConfigError::InvalidDuration {
                field: "client timeout",
                value: self.client_timeout.clone(),
                reason,
            }
        })?;
        Ok((!timeout.is_zero()).then_some(timeout))
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            servers: Vec::new(),
            client_timeout: default_client_timeout(),
        }
    }
}

fn default_client_timeout() -> String {
    "0s".to_string()
}
