use super::responses;
use crate::ports::UpstreamExchange;
use crate::services::{DebounceGate, PassiveCache};
use hickory_proto::op::Message;
use hickory_proto::rr::{DNSClass, Name, RData, RecordType};
use passdns_domain::{reverse_name, ClientTransport};
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// TTL on answers synthesized from the passive cache.
pub const CACHED_PTR_TTL: u32 = 300;

/// The per-query decision pipeline.
///
/// `execute` returns the message to send back, or `None` when the query
/// must go unanswered. Unanswered is deliberate in two places: a debounced
/// source, and a forwarding failure that is not the upstream's fault to
/// report (an undecodable or mismatched reply).
pub struct HandleDnsQueryUseCase {
    debounce: Arc<DebounceGate>,
    cache: Arc<PassiveCache>,
    upstream: Arc<dyn UpstreamExchange>,
}

impl HandleDnsQueryUseCase {
    pub fn new(
        debounce: Arc<DebounceGate>,
        cache: Arc<PassiveCache>,
        upstream: Arc<dyn UpstreamExchange>,
    ) -> Self {
        Self {
            debounce,
            cache,
            upstream,
        }
    }

    pub async fn execute(
        &self,
        query: &Message,
        client: SocketAddr,
        transport: ClientTransport,
    ) -> Option<Message> {
        if transport.is_connectionless() && !self.debounce.allow(client.ip()) {
            debug!(client = %client, "Dropping debounced query");
            return None;
        }

        let Some(question) = query.queries().first() else {
            debug!(client = %client, id = query.id(), "Dropping query without a question");
            return None;
        };
        let qname = question.name().to_string();

        info!(
            client = %client,
            transport = %transport,
            name = %qname,
            qtype = %question.query_type(),
            "Query received"
        );

        if question.query_type() == RecordType::PTR && question.query_class() == DNSClass::IN {
            if let Some(forward) = self.cache.lookup(&qname) {
                match Name::from_str(&forward) {
                    Ok(target) => {
                        info!(name = %qname, answer = %forward, "Answered from passive cache");
                        return Some(responses::cached_ptr(
                            query,
                            question,
                            target,
                            CACHED_PTR_TTL,
                        ));
                    }
                    Err(e) => {
                        warn!(name = %qname, forward = %forward, error = %e, "Cached name is not a valid domain name");
                    }
                }
            }
        }

        if !query.recursion_desired() {
            debug!(client = %client, name = %qname, "Refusing non-recursive query");
            return Some(responses::refuse_non_recursive(query, question));
        }

        match self.upstream.exchange(query).await {
            Ok(reply) => {
                info!(
                    name = %qname,
                    upstream = %reply.upstream,
                    rtt_ms = reply.rtt.as_millis() as u64,
                    answers = reply.message.answers().len(),
                    "Upstream answered"
                );
                self.learn(&qname, &reply.message).await;
                Some(reply.message)
            }
            Err(e) if e.is_servfail_worthy() => {
                warn!(name = %qname, error = %e, "Forwarding failed, answering SERVFAIL");
                Some(responses::server_failure(query, question))
            }
            Err(e) => {
                warn!(name = %qname, error = %e, "Forwarding failed, dropping query");
                None
            }
        }
    }

    /// Maps every address in the answer section back to the name that was
    /// asked for. Store failures are already logged by the cache and never
    /// change the reply.
    async fn learn(&self, forward_name: &str, response: &Message) {
        for record in response.answers() {
            let addr = match record.data() {
                Some(RData::A(a)) => IpAddr::V4(a.0),
                Some(RData::AAAA(aaaa)) => IpAddr::V6(aaaa.0),
                _ => continue,
            };

            let reverse = reverse_name(addr);
            debug!(reverse = %reverse, forward = %forward_name, "Learned passive record");
            let _ = self.cache.remember(&reverse, forward_name).await;
        }
    }
}
