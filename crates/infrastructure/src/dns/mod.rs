pub mod router;
pub mod server;
pub mod transport;

pub use router::{UpstreamRoute, UpstreamRouter};
pub use server::{serve_tls, serve_udp, DnsServerHandler};
