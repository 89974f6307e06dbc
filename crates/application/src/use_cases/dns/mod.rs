mod handle_dns_query;
pub mod responses;

pub use handle_dns_query::{HandleDnsQueryUseCase, CACHED_PTR_TTL};
