mod ptr_store;
mod upstream_exchange;

pub use ptr_store::PtrStore;
pub use upstream_exchange::{UpstreamExchange, UpstreamReply};
