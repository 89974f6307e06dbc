use super::DnsServerHandler;
use passdns_domain::ClientTransport;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{info, warn};

const MAX_UDP_QUERY_SIZE: usize = 4096;

/// Receives datagrams forever, handling each one on its own task.
pub async fn serve_udp(socket: Arc<UdpSocket>, handler: DnsServerHandler) {
    if let Ok(local_addr) = socket.local_addr() {
        info!(bind_address = %local_addr, "UDP listener ready");
    }

    let mut recv_buf = vec![0u8; MAX_UDP_QUERY_SIZE];
    loop {
        let (len, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) => {
                warn!(error = %e, "UDP recv error");
                continue;
            }
        };

        let query: Arc<[u8]> = Arc::from(&recv_buf[..len]);
        let socket = socket.clone();
        let handler = handler.clone();
        tokio::spawn(async move {
            let Some(response) = handler.handle_wire(&query, from, ClientTransport::Udp).await
            else {
                return;
            };
            if let Err(e) = socket.send_to(&response, from).await {
                warn!(client = %from, error = %e, "Failed to send UDP response");
            }
        });
    }
}
