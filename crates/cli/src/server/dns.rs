use crate::bootstrap::PRIVILEGE_HINT;
use anyhow::Context;
use passdns_domain::config::ServerConfig;
use passdns_infrastructure::dns::{serve_tls, serve_udp, DnsServerHandler};
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::{TcpListener, UdpSocket};
use tokio_rustls::TlsAcceptor;
use tracing::{error, info};

/// Binds every configured listener and spawns its serve loop. Returns once
/// all sockets are bound; the loops run until the process exits.
pub fn start_dns_listeners(
    server: &ServerConfig,
    acceptor: Option<TlsAcceptor>,
    handler: DnsServerHandler,
) -> anyhow::Result<()> {
    if server.udp_enabled() {
        let socket_addr = parse_listen(&server.listen)?;
        let socket = create_udp_socket(socket_addr).map_err(|e| bind_error(e, socket_addr))?;
        info!(bind_address = %socket_addr, "Starting UDP DNS listener");
        tokio::spawn(serve_udp(Arc::new(socket), handler.clone()));
    }

    if let Some(acceptor) = acceptor {
        let socket_addr = parse_listen(&server.tls_listen)?;
        let listener =
            create_tcp_listener(socket_addr).map_err(|e| bind_error(e, socket_addr))?;
        info!(bind_address = %socket_addr, "Starting DNS-over-TLS listener");
        tokio::spawn(serve_tls(listener, acceptor, handler));
    }

    Ok(())
}

/// Blocks until SIGINT or SIGTERM. In-flight queries are not drained: the
/// caller returns and the runtime drops whatever is still running.
pub async fn wait_for_shutdown() {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received SIGINT, shutting down");
        }
        _ = wait_for_sigterm() => {
            info!("Received SIGTERM, shutting down");
        }
    }
}

#[cfg(unix)]
async fn wait_for_sigterm() {
    use tokio::signal::unix::{signal, SignalKind};
    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            error!(error = %e, "Failed to register SIGTERM handler");
            std::future::pending::<()>().await
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_sigterm() {
    std::future::pending::<()>().await
}

/// Accepts `host:port`, `[v6]:port`, or a bare `:port` meaning every IPv4
/// interface.
fn parse_listen(addr: &str) -> anyhow::Result<SocketAddr> {
    if let Some(port) = addr.strip_prefix(':') {
        let port: u16 = port
            .parse()
            .with_context(|| format!("invalid listen port in {:?}", addr))?;
        return Ok((Ipv4Addr::UNSPECIFIED, port).into());
    }
    addr.parse()
        .with_context(|| format!("invalid listen address {:?}", addr))
}

fn bind_error(e: io::Error, socket_addr: SocketAddr) -> anyhow::Error {
    if e.kind() == io::ErrorKind::PermissionDenied {
        error!(bind_address = %socket_addr, hint = PRIVILEGE_HINT, "Not permitted to bind");
    }
    anyhow::Error::new(e).context(format!("failed to bind {}", socket_addr))
}

fn socket_domain(socket_addr: SocketAddr) -> Domain {
    if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    }
}

fn create_udp_socket(socket_addr: SocketAddr) -> io::Result<UdpSocket> {
    let socket = Socket::new(socket_domain(socket_addr), Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket)
}

fn create_tcp_listener(socket_addr: SocketAddr) -> io::Result<TcpListener> {
    let socket = Socket::new(socket_domain(socket_addr), Type::STREAM, Some(Protocol::TCP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;
    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
