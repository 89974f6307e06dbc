use async_trait::async_trait;
use hickory_proto::op::Message;
use passdns_application::ports::{PtrStore, UpstreamExchange, UpstreamReply};
use passdns_domain::DomainError;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Responder = dyn Fn(&Message) -> Result<Message, DomainError> + Send + Sync;

/// Upstream that answers through a closure and counts exchanges.
#[derive(Clone)]
pub struct MockUpstream {
    responder: Arc<Responder>,
    calls: Arc<AtomicUsize>,
}

impl MockUpstream {
    pub fn answering<F>(responder: F) -> Self
    where
        F: Fn(&Message) -> Result<Message, DomainError> + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self::answering(move |_| Err(error.clone()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UpstreamExchange for MockUpstream {
    async fn exchange(&self, query: &Message) -> Result<UpstreamReply, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let message = (self.responder)(query)?;
        Ok(UpstreamReply {
            message,
            rtt: Duration::from_millis(3),
            upstream: "udp://198.51.100.1:53".to_string(),
        })
    }
}

#[derive(Default)]
pub struct MockPtrStore {
    records: Mutex<BTreeMap<String, String>>,
    fail_writes: bool,
}

impl MockPtrStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: &[(&str, &str)]) -> Self {
        let store = Self::new();
        {
            let mut map = store.records.lock().unwrap();
            for (k, v) in records {
                map.insert(k.to_string(), v.to_string());
            }
        }
        store
    }

    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.records.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl PtrStore for MockPtrStore {
    async fn load_all(&self) -> Result<Vec<(String, String)>, DomainError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    async fn put(&self, reverse_name: &str, forward_name: &str) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(DomainError::Persistence("disk full".to_string()));
        }
        self.records
            .lock()
            .unwrap()
            .insert(reverse_name.to_string(), forward_name.to_string());
        Ok(())
    }
}
