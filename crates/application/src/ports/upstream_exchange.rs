use async_trait::async_trait;
use hickory_proto::op::Message;
use passdns_domain::DomainError;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub message: Message,
    pub rtt: Duration,
    pub upstream: String,
}

/// Sends a query, verbatim, to whichever upstream is responsible for it.
#[async_trait]
pub trait UpstreamExchange: Send + Sync {
    async fn exchange(&self, query: &Message) -> Result<UpstreamReply, DomainError>;
}
