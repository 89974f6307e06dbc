use hickory_proto::op::Message;
use passdns_application::use_cases::HandleDnsQueryUseCase;
use passdns_domain::ClientTransport;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error};

/// Wire-level adapter between the listeners and the query pipeline.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Decodes one inbound message and returns the encoded reply, if any.
    /// Undecodable input gets no reply.
    pub async fn handle_wire(
        &self,
        query_bytes: &[u8],
        client: SocketAddr,
        transport: ClientTransport,
    ) -> Option<Vec<u8>> {
        let query = match Message::from_vec(query_bytes) {
            Ok(query) => query,
            Err(e) => {
                debug!(client = %client, transport = %transport, error = %e, "Dropping undecodable message");
                return None;
            }
        };

        let response = self.use_case.execute(&query, client, transport).await?;

        match response.to_vec() {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                error!(client = %client, id = response.id(), error = %e, "Failed to encode response");
                None
            }
        }
    }
}
