mod handler;
mod tls;
mod udp;

pub use handler::DnsServerHandler;
pub use tls::{serve_tls, TLS_IDLE_TIMEOUT};
pub use udp::serve_udp;
