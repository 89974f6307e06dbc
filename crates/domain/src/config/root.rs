use serde::{Deserialize, Serialize};

use super::debounce::DebounceConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::privileges::PrivilegeConfig;
use super::server::ServerConfig;
use super::store::StoreConfig;
use super::upstream::UpstreamConfig;

/// Main configuration structure for passdns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener addresses and TLS material
    #[serde(default)]
    pub server: ServerConfig,

    /// Forwarding routes and client timeout
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Per-source reply limiter
    #[serde(default)]
    pub debounce: DebounceConfig,

    /// Durable passive-DNS store
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub privileges: PrivilegeConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. passdns.toml in current directory
    /// 3. /etc/passdns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("passdns.toml").exists() {
            Self::from_file("passdns.toml")?
        } else if std::path::Path::new("/etc/passdns/config.toml").exists() {
            Self::from_file("/etc/passdns/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(listen) = overrides.listen {
            self.server.listen = listen;
        }
        if let Some(tls_listen) = overrides.tls_listen {
            self.server.tls_listen = tls_listen;
        }
        if let Some(cert) = overrides.cert {
            self.server.cert = cert;
        }
        if let Some(key) = overrides.key {
            self.server.key = key;
        }
        if !overrides.upstreams.is_empty() {
            self.upstream.servers = overrides.upstreams;
        }
        if let Some(timeout) = overrides.client_timeout {
            self.upstream.client_timeout = timeout;
        }
        if let Some(window) = overrides.debounce_window {
            self.debounce.window = window;
        }
        if let Some(burst) = overrides.debounce_burst {
            self.debounce.burst = burst;
        }
        if let Some(path) = overrides.store_path {
            self.store.path = path;
        }
        if let Some(chroot) = overrides.chroot {
            self.privileges.chroot = chroot;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if overrides.silent {
            self.logging.silent = true;
        }
    }

    /// Checks everything that can be checked without touching the network
    /// or the filesystem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.server.udp_enabled() && !self.server.tls_enabled() {
            return Err(ConfigError::NoListeners);
        }

        self.upstream.specs()?;
        self.upstream.client_timeout()?;
        self.debounce.window()?;

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub listen: Option<String>,
    pub tls_listen: Option<String>,
    pub cert: Option<String>,
    pub key: Option<String>,
    pub upstreams: Vec<String>,
    pub client_timeout: Option<String>,
    pub debounce_window: Option<String>,
    pub debounce_burst: Option<u32>,
    pub store_path: Option<String>,
    pub chroot: Option<String>,
    pub log_level: Option<String>,
    pub silent: bool,
}
