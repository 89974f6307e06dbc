//! Plain UDP exchange. Messages are sent as-is, one datagram each way.

use super::{resolve_upstream, DnsTransport, TransportResponse};
use async_trait::async_trait;
use passdns_domain::{DomainError, UpstreamAddr};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;
use tracing::debug;

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub struct UdpTransport {
    upstream_addr: UpstreamAddr,
}

impl UdpTransport {
    pub fn new(upstream_addr: UpstreamAddr) -> Self {
        Self { upstream_addr }
    }

    pub fn server(&self) -> &UpstreamAddr {
        &self.upstream_addr
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(&self, message_bytes: &[u8]) -> Result<TransportResponse, DomainError> {
        let server_addr = resolve_upstream(&self.upstream_addr).await?;

        let bind_addr: SocketAddr = if server_addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr).await.map_err(|e| {
            DomainError::transport(server_addr, format!("failed to bind UDP socket: {}", e))
        })?;

        // A connected socket only accepts datagrams from the upstream and
        // surfaces ICMP port-unreachable as ECONNREFUSED on the next recv.
        socket
            .connect(server_addr)
            .await
            .map_err(|e| DomainError::transport(server_addr, format!("connect failed: {}", e)))?;

        socket
            .send(message_bytes)
            .await
            .map_err(|e| DomainError::transport(server_addr, format!("send failed: {}", e)))?;

        debug!(
            server = %server_addr,
            bytes_sent = message_bytes.len(),
            "UDP query sent"
        );

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let bytes_received = socket
            .recv(&mut recv_buf)
            .await
            .map_err(|e| DomainError::transport(server_addr, format!("receive failed: {}", e)))?;

        recv_buf.truncate(bytes_received);
        debug!(
            server = %server_addr,
            bytes_received = bytes_received,
            "UDP response received"
        );

        Ok(TransportResponse {
            bytes: recv_buf,
            protocol_used: "UDP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
