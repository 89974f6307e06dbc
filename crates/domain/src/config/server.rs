use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// UDP listen address. Empty disables the UDP listener.
    #[serde(default = "default_listen")]
    pub listen: String,

    /// DNS-over-TLS listen address. Only used when `cert` is set.
    #[serde(default = "default_tls_listen")]
    pub tls_listen: String,

    /// PEM certificate chain for the TLS listener.
    #[serde(default)]
    pub cert: String,

    /// PEM private key. Defaults to the certificate file.
    #[serde(default)]
    pub key: String,
}

impl ServerConfig {
    pub fn udp_enabled(&self) -> bool {
        !self.listen.is_empty()
    }

    pub fn tls_enabled(&self) -> bool {
        !self.tls_listen.is_empty() && !self.cert.is_empty()
    }

    pub fn key_path(&self) -> &str {
        if self.key.is_empty() {
            &self.cert
        } else {
            &self.key
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            tls_listen: default_tls_listen(),
            cert: String::new(),
            key: String::new(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:53".to_string()
}

fn default_tls_listen() -> String {
    "0.0.0.0:853".to_string()
}
