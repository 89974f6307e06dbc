use super::transport::{create_transport, Transport};
use async_trait::async_trait;
use hickory_proto::op::Message;
use passdns_application::ports::{UpstreamExchange, UpstreamReply};
use passdns_domain::{normalize_name, suffix_candidates, DomainError, UpstreamSpec};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct UpstreamRoute {
    spec: UpstreamSpec,
    transport: Transport,
}

impl UpstreamRoute {
    pub fn new(spec: UpstreamSpec, transport: Transport) -> Self {
        Self { spec, transport }
    }

    pub fn spec(&self) -> &UpstreamSpec {
        &self.spec
    }
}

/// Suffix-routed forwarding table.
///
/// Lookup tries the exact query name first, then each suffix that starts
/// at a label boundary, walking toward the root, and finally the wildcard.
/// The table is built once and never changes.
pub struct UpstreamRouter {
    routes: FxHashMap<String, Arc<UpstreamRoute>>,
    wildcard: Option<Arc<UpstreamRoute>>,
    timeout: Option<Duration>,
}

impl UpstreamRouter {
    pub fn new(specs: Vec<UpstreamSpec>, timeout: Option<Duration>) -> Self {
        let routes = specs
            .into_iter()
            .map(|spec| {
                let transport = create_transport(&spec.protocol);
                UpstreamRoute::new(spec, transport)
            })
            .collect();
        Self::from_routes(routes, timeout)
    }

    /// Builds the table from prepared routes. A later route for the same
    /// domain replaces an earlier one.
    pub fn from_routes(routes: Vec<UpstreamRoute>, timeout: Option<Duration>) -> Self {
        let mut table = FxHashMap::default();
        let mut wildcard = None;

        for route in routes {
            info!(
                domain = %route.spec.domain,
                upstream = %route.spec.protocol,
                protocol = route.transport.protocol_name(),
                "Upstream route configured"
            );
            let route = Arc::new(route);
            if route.spec.is_wildcard() {
                wildcard = Some(route);
            } else {
                table.insert(route.spec.domain.clone(), route);
            }
        }

        Self {
            routes: table,
            wildcard,
            timeout,
        }
    }

    pub fn select(&self, name: &str) -> Option<&UpstreamRoute> {
        let name = normalize_name(name);
        let route = suffix_candidates(&name)
            .find_map(|candidate| self.routes.get(candidate))
            .or(self.wildcard.as_ref())
            .map(Arc::as_ref);
        route
    }

    pub fn len(&self) -> usize {
        self.routes.len() + usize::from(self.wildcard.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UpstreamExchange for UpstreamRouter {
    async fn exchange(&self, query: &Message) -> Result<UpstreamReply, DomainError> {
        let question = query
            .queries()
            .first()
            .ok_or_else(|| DomainError::ProtocolViolation("query has no question".to_string()))?;
        let name = question.name().to_string();

        let route = self
            .select(&name)
            .ok_or_else(|| DomainError::NoUpstream(name.clone()))?;
        debug!(name = %name, upstream = %route.spec.protocol, "Forwarding query");

        let query_bytes = query.to_vec().map_err(|e| {
            DomainError::ProtocolViolation(format!("failed to encode query: {}", e))
        })?;

        let start = Instant::now();
        let response = route.transport.send(&query_bytes, self.timeout).await?;
        let rtt = start.elapsed();
        debug!(
            upstream = %route.spec.protocol,
            protocol = response.protocol_used,
            rtt_ms = rtt.as_millis() as u64,
            "Upstream reply received"
        );

        let message = Message::from_vec(&response.bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!(
                "undecodable reply from {}: {}",
                route.spec.protocol, e
            ))
        })?;

        if message.id() != query.id() {
            return Err(DomainError::InvalidDnsResponse(format!(
                "reply id {} from {} does not match query id {}",
                message.id(),
                route.spec.protocol,
                query.id()
            )));
        }

        Ok(UpstreamReply {
            message,
            rtt,
            upstream: route.spec.protocol.to_string(),
        })
    }
}
