//! DNS over TCP: every message carries a two-byte big-endian length prefix.
//! The framing helpers are shared with DNS-over-TLS, client and server side.

use super::{resolve_upstream, DnsTransport, TransportResponse};
use async_trait::async_trait;
use passdns_domain::{DomainError, UpstreamAddr};
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

pub struct TcpTransport {
    upstream_addr: UpstreamAddr,
}

impl TcpTransport {
    pub fn new(upstream_addr: UpstreamAddr) -> Self {
        Self { upstream_addr }
    }

    pub fn server(&self) -> &UpstreamAddr {
        &self.upstream_addr
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(&self, message_bytes: &[u8]) -> Result<TransportResponse, DomainError> {
        let server_addr = resolve_upstream(&self.upstream_addr).await?;

        let mut stream = TcpStream::connect(server_addr)
            .await
            .map_err(|e| DomainError::transport(server_addr, format!("connect failed: {}", e)))?;
        stream
            .set_nodelay(true)
            .map_err(|e| DomainError::transport(server_addr, e))?;

        send_with_length_prefix(&mut stream, message_bytes)
            .await
            .map_err(|e| DomainError::transport(server_addr, format!("send failed: {}", e)))?;

        debug!(
            server = %server_addr,
            message_len = message_bytes.len(),
            "TCP query sent"
        );

        let response_bytes = read_with_length_prefix(&mut stream)
            .await
            .map_err(|e| DomainError::transport(server_addr, format!("receive failed: {}", e)))?;

        debug!(
            server = %server_addr,
            response_len = response_bytes.len(),
            "TCP response received"
        );

        Ok(TransportResponse {
            bytes: response_bytes,
            protocol_used: "TCP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}

pub(crate) async fn send_with_length_prefix<S>(stream: &mut S, message_bytes: &[u8]) -> io::Result<()>
where
    S: AsyncWrite + Unpin,
{
    let length = u16::try_from(message_bytes.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("message of {} bytes does not fit a length prefix", message_bytes.len()),
        )
    })?;

    let mut framed = Vec::with_capacity(message_bytes.len() + 2);
    framed.extend_from_slice(&length.to_be_bytes());
    framed.extend_from_slice(message_bytes);

    stream.write_all(&framed).await?;
    stream.flush().await
}

pub(crate) async fn read_with_length_prefix<S>(stream: &mut S) -> io::Result<Vec<u8>>
where
    S: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;

    let message_len = u16::from_be_bytes(len_buf) as usize;
    let mut message = vec![0u8; message_len];
    stream.read_exact(&mut message).await?;

    Ok(message)
}
