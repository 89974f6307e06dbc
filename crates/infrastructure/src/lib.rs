//! passdns adapters: upstream transports and routing, the redb store,
//! and the UDP / DNS-over-TLS listeners.
pub mod dns;
pub mod store;
pub mod tls;
