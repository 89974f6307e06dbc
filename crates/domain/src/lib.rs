//! passdns domain layer
pub mod client_transport;
pub mod config;
pub mod dns_protocol;
pub mod errors;
pub mod reverse_name;
pub mod upstream_route;

pub use client_transport::ClientTransport;
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_protocol::{DnsProtocol, UpstreamAddr};
pub use errors::DomainError;
pub use reverse_name::reverse_name;
pub use upstream_route::{normalize_name, suffix_candidates, UpstreamSpec};
