use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

/// Represents an upstream server address that may or may not be resolved to an IP.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UpstreamAddr {
    Resolved(SocketAddr),
    Unresolved { hostname: Arc<str>, port: u16 },
}

impl fmt::Display for UpstreamAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamAddr::Resolved(addr) => write!(f, "{}", addr),
            UpstreamAddr::Unresolved { hostname, port } => write!(f, "{}:{}", hostname, port),
        }
    }
}

/// Transport used to reach one upstream resolver.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DnsProtocol {
    Udp {
        addr: UpstreamAddr,
    },
    Tcp {
        addr: UpstreamAddr,
    },
    Tls {
        addr: UpstreamAddr,
        hostname: Arc<str>,
    },
}

fn parse_host_port(s: &str) -> Option<(&str, u16)> {
    if s.starts_with('[') {
        let end = s.find(']')?;
        let host = &s[1..end];
        let rest = &s[end + 1..];
        let port_str = rest.strip_prefix(':')?;
        let port = port_str.parse::<u16>().ok()?;
        Some((host, port))
    } else {
        let (host, port_str) = s.rsplit_once(':')?;
        if host.is_empty() || host.contains(':') {
            return None;
        }
        let port = port_str.parse::<u16>().ok()?;
        Some((host, port))
    }
}

fn parse_upstream_addr(addr_str: &str) -> Result<UpstreamAddr, String> {
    if let Ok(addr) = addr_str.parse::<SocketAddr>() {
        return Ok(UpstreamAddr::Resolved(addr));
    }
    if let Some((host, port)) = parse_host_port(addr_str) {
        return Ok(UpstreamAddr::Unresolved {
            hostname: host.into(),
            port,
        });
    }
    Err(format!("Invalid address '{}'", addr_str))
}

fn tls_hostname(addr_str: &str) -> Arc<str> {
    match parse_host_port(addr_str) {
        Some((host, _)) => host.into(),
        None => addr_str.into(),
    }
}

impl FromStr for DnsProtocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scheme, addr_str) = match s.split_once("://") {
            Some((scheme, rest)) => (scheme, rest),
            None => ("udp", s),
        };

        match scheme.to_ascii_lowercase().as_str() {
            "udp" => {
                let addr = parse_upstream_addr(addr_str)
                    .map_err(|_| format!("Invalid UDP address '{}'", addr_str))?;
                Ok(DnsProtocol::Udp { addr })
            }
            "tcp" => {
                let addr = parse_upstream_addr(addr_str)
                    .map_err(|_| format!("Invalid TCP address '{}'", addr_str))?;
                Ok(DnsProtocol::Tcp { addr })
            }
            "tcp-tls" | "tls" => {
                let addr = parse_upstream_addr(addr_str).map_err(|_| {
                    format!(
                        "Invalid TLS format '{}'. Expected 'tcp-tls://IP:PORT' or 'tcp-tls://HOSTNAME:PORT'",
                        s
                    )
                })?;
                Ok(DnsProtocol::Tls {
                    addr,
                    hostname: tls_hostname(addr_str),
                })
            }
            other => Err(format!(
                "Unsupported upstream protocol '{}' in '{}'. Expected udp://, tcp:// or tcp-tls://",
                other, s
            )),
        }
    }
}

impl fmt::Display for DnsProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DnsProtocol::Udp { addr } => write!(f, "udp://{}", addr),
            DnsProtocol::Tcp { addr } => write!(f, "tcp://{}", addr),
            DnsProtocol::Tls { addr, .. } => write!(f, "tcp-tls://{}", addr),
        }
    }
}
