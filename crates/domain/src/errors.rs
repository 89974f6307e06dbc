use thiserror::Error;

/// Every failure a request or startup step can end in.
///
/// The kind is chosen where the failure happens; callers branch on the
/// variant, never on the message text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Transport error talking to {server}: {reason}")]
    Transport { server: String, reason: String },

    #[error("No upstream server configured for {0}")]
    NoUpstream(String),

    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DomainError {
    pub fn transport(server: impl ToString, reason: impl ToString) -> Self {
        Self::Transport {
            server: server.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Failures the client should hear about as SERVFAIL. Everything else
    /// on the forwarding path is dropped without a reply.
    pub fn is_servfail_worthy(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::NoUpstream(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_servfail_worthy_kinds() {
        assert!(DomainError::transport("1.1.1.1:853", "connection refused").is_servfail_worthy());
        assert!(DomainError::NoUpstream("example.com.".into()).is_servfail_worthy());
        assert!(!DomainError::InvalidDnsResponse("id mismatch".into()).is_servfail_worthy());
        assert!(!DomainError::ProtocolViolation("no question".into()).is_servfail_worthy());
        assert!(!DomainError::Persistence("disk full".into()).is_servfail_worthy());
    }

    #[test]
    fn test_transport_display_names_server() {
        let err = DomainError::transport("9.9.9.9:53", "timed out");
        assert_eq!(
            err.to_string(),
            "Transport error talking to 9.9.9.9:53: timed out"
        );
    }
}
