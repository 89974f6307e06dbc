pub mod tcp;
#[cfg(feature = "dns-over-rustls")]
pub mod tls;
pub mod udp;

use async_trait::async_trait;
use passdns_domain::{DnsProtocol, DomainError, UpstreamAddr};
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,
    pub protocol_used: &'static str,
}

/// One round trip to one upstream. Implementations do not enforce a
/// deadline themselves; `Transport::send` wraps them in the client timeout.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(&self, message_bytes: &[u8]) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}

pub enum Transport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
    #[cfg(feature = "dns-over-rustls")]
    Tls(tls::TlsTransport),
}

impl Transport {
    /// Sends `message_bytes` and waits for the reply, for at most `timeout`
    /// when one is set.
    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Option<Duration>,
    ) -> Result<TransportResponse, DomainError> {
        match self {
            Self::Udp(t) => {
                within(timeout, t.server(), DnsTransport::send(t, message_bytes)).await
            }
            Self::Tcp(t) => {
                within(timeout, t.server(), DnsTransport::send(t, message_bytes)).await
            }
            #[cfg(feature = "dns-over-rustls")]
            Self::Tls(t) => {
                within(timeout, t.server(), DnsTransport::send(t, message_bytes)).await
            }
        }
    }

    pub fn protocol_name(&self) -> &'static str {
        match self {
            Self::Udp(t) => t.protocol_name(),
            Self::Tcp(t) => t.protocol_name(),
            #[cfg(feature = "dns-over-rustls")]
            Self::Tls(t) => t.protocol_name(),
        }
    }
}

pub fn create_transport(protocol: &DnsProtocol) -> Transport {
    match protocol {
        DnsProtocol::Udp { addr } => Transport::Udp(udp::UdpTransport::new(addr.clone())),
        DnsProtocol::Tcp { addr } => Transport::Tcp(tcp::TcpTransport::new(addr.clone())),

        #[cfg(feature = "dns-over-rustls")]
        DnsProtocol::Tls { addr, hostname } => {
            Transport::Tls(tls::TlsTransport::new(addr.clone(), hostname.clone()))
        }

        #[cfg(not(feature = "dns-over-rustls"))]
        DnsProtocol::Tls { addr, .. } => {
            tracing::warn!("TLS feature not enabled, falling back to TCP for {}", addr);
            Transport::Tcp(tcp::TcpTransport::new(addr.clone()))
        }
    }
}

async fn within<T, F>(
    timeout: Option<Duration>,
    server: &UpstreamAddr,
    operation: F,
) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, operation)
            .await
            .map_err(|_| DomainError::transport(server, format!("no reply within {:?}", limit)))?,
        None => operation.await,
    }
}

/// Turns a configured upstream into something connectable. Host names are
/// looked up on every call with the system resolver.
pub(crate) async fn resolve_upstream(addr: &UpstreamAddr) -> Result<SocketAddr, DomainError> {
    match addr {
        UpstreamAddr::Resolved(socket_addr) => Ok(*socket_addr),
        UpstreamAddr::Unresolved { hostname, port } => {
            tokio::net::lookup_host((hostname.as_ref(), *port))
                .await
                .map_err(|e| DomainError::transport(addr, format!("lookup failed: {}", e)))?
                .next()
                .ok_or_else(|| DomainError::transport(addr, "host name has no addresses"))
        }
    }
}
