#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Cannot parse {field} duration {value:?}: {reason}")]
    InvalidDuration {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid upstream {0}")]
    InvalidUpstream(String),

    #[error("No DNS server listeners defined")]
    NoListeners,

    #[error("Cannot load TLS certificate/key from {cert:?}/{key:?}: {reason}")]
    TlsMaterial {
        cert: String,
        key: String,
        reason: String,
    },

    #[error("Cannot chroot to {path:?}: {reason}")]
    PrivilegeDrop { path: String, reason: String },

    #[error("Configuration validation error: {0}")]
    Validation(String),
}
