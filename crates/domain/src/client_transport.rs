use std::fmt;

/// How a query reached us. Only connectionless traffic can be spoofed into
/// a reflection attack, so the abuse gate keys off this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientTransport {
    Udp,
    Tls,
}

impl ClientTransport {
    pub fn is_connectionless(&self) -> bool {
        matches!(self, Self::Udp)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Udp => "udp",
            Self::Tls => "tls",
        }
    }
}

impl fmt::Display for ClientTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
