//! DNS-over-TLS client (RFC 7858): TCP framing inside a rustls session.
//!
//! One connection per exchange. The server certificate is checked against
//! the webpki root set, using the configured host (or IP literal) as the
//! expected server name.

use super::tcp::{read_with_length_prefix, send_with_length_prefix};
use super::{resolve_upstream, DnsTransport, TransportResponse};
use crate::tls::ensure_crypto_provider;
use async_trait::async_trait;
use passdns_domain::{DomainError, UpstreamAddr};
use rustls::pki_types::ServerName;
use std::sync::{Arc, LazyLock};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tracing::debug;

/// Shared client config, built once for all DoT upstreams.
static SHARED_TLS_CONFIG: LazyLock<Arc<rustls::ClientConfig>> = LazyLock::new(|| {
    ensure_crypto_provider();

    let mut root_store = rustls::RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Arc::new(config)
});

pub struct TlsTransport {
    upstream_addr: UpstreamAddr,
    hostname: Arc<str>,
    config: Arc<rustls::ClientConfig>,
}

impl TlsTransport {
    pub fn new(upstream_addr: UpstreamAddr, hostname: Arc<str>) -> Self {
        Self::with_client_config(upstream_addr, hostname, SHARED_TLS_CONFIG.clone())
    }

    /// Same transport with a caller-supplied trust configuration.
    pub fn with_client_config(
        upstream_addr: UpstreamAddr,
        hostname: Arc<str>,
        config: Arc<rustls::ClientConfig>,
    ) -> Self {
        Self {
            upstream_addr,
            hostname,
            config,
        }
    }

    pub fn server(&self) -> &UpstreamAddr {
        &self.upstream_addr
    }
}

#[async_trait]
impl DnsTransport for TlsTransport {
    async fn send(&self, message_bytes: &[u8]) -> Result<TransportResponse, DomainError> {
        let server_name = ServerName::try_from(self.hostname.to_string()).map_err(|e| {
            DomainError::transport(
                &self.upstream_addr,
                format!("invalid TLS server name '{}': {}", self.hostname, e),
            )
        })?;
        let server_addr = resolve_upstream(&self.upstream_addr).await?;

        let tcp_stream = TcpStream::connect(server_addr)
            .await
            .map_err(|e| DomainError::transport(server_addr, format!("connect failed: {}", e)))?;
        tcp_stream
            .set_nodelay(true)
            .map_err(|e| DomainError::transport(server_addr, e))?;

        let connector = TlsConnector::from(self.config.clone());
        let mut stream = connector
            .connect(server_name, tcp_stream)
            .await
            .map_err(|e| {
                DomainError::transport(server_addr, format!("TLS handshake failed: {}", e))
            })?;

        debug!(server = %server_addr, hostname = %self.hostname, "TLS connection established");

        send_with_length_prefix(&mut stream, message_bytes)
            .await
            .map_err(|e| DomainError::transport(server_addr, format!("send failed: {}", e)))?;

        let response_bytes = read_with_length_prefix(&mut stream)
            .await
            .map_err(|e| DomainError::transport(server_addr, format!("receive failed: {}", e)))?;

        debug!(
            server = %server_addr,
            response_len = response_bytes.len(),
            "TLS response received"
        );

        Ok(TransportResponse {
            bytes: response_bytes,
            protocol_used: "TLS",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "TLS"
    }
}
