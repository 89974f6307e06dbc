use super::DnsServerHandler;
use crate::dns::transport::tcp::{read_with_length_prefix, send_with_length_prefix};
use passdns_domain::ClientTransport;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tracing::{debug, info, warn};

/// A connection with no complete query for this long is closed. The same
/// bound applies to the handshake.
pub const TLS_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Accepts DNS-over-TLS connections forever, one task per connection.
pub async fn serve_tls(listener: TcpListener, acceptor: TlsAcceptor, handler: DnsServerHandler) {
    if let Ok(local_addr) = listener.local_addr() {
        info!(bind_address = %local_addr, "TLS listener ready");
    }

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "TCP accept error");
                continue;
            }
        };

        let acceptor = acceptor.clone();
        let handler = handler.clone();
        tokio::spawn(async move {
            let tls_stream =
                match tokio::time::timeout(TLS_IDLE_TIMEOUT, acceptor.accept(stream)).await {
                    Ok(Ok(tls_stream)) => tls_stream,
                    Ok(Err(e)) => {
                        warn!(client = %peer, error = %e, "TLS handshake failed");
                        return;
                    }
                    Err(_) => {
                        warn!(client = %peer, "TLS handshake timed out");
                        return;
                    }
                };
            serve_connection(tls_stream, peer, handler).await;
        });
    }
}

/// Answers length-prefixed queries in order until the peer goes away or
/// stays idle too long.
async fn serve_connection<S>(mut stream: S, peer: SocketAddr, handler: DnsServerHandler)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    loop {
        let query = match tokio::time::timeout(TLS_IDLE_TIMEOUT, read_with_length_prefix(&mut stream)).await {
            Ok(Ok(query)) => query,
            Ok(Err(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                debug!(client = %peer, "TLS client closed connection");
                return;
            }
            Ok(Err(e)) => {
                debug!(client = %peer, error = %e, "TLS read failed");
                return;
            }
            Err(_) => {
                debug!(client = %peer, "TLS connection idle, closing");
                return;
            }
        };

        let Some(response) = handler.handle_wire(&query, peer, ClientTransport::Tls).await else {
            continue;
        };
        if let Err(e) = send_with_length_prefix(&mut stream, &response).await {
            warn!(client = %peer, error = %e, "Failed to send TLS response");
            return;
        }
    }
}
