use crate::ports::PtrStore;
use dashmap::DashMap;
use passdns_domain::DomainError;
use rustc_hash::FxBuildHasher;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Reverse name -> forward name, learned from upstream address answers.
///
/// The in-memory map is authoritative for serving. When a store is
/// attached, every write goes to memory first and is then persisted; the
/// two may disagree for a moment, or permanently if the store write fails.
pub struct PassiveCache {
    entries: DashMap<String, Arc<str>, FxBuildHasher>,
    store: Option<Arc<dyn PtrStore>>,
}

fn cache_key(reverse_name: &str) -> String {
    let mut key = reverse_name.to_ascii_lowercase();
    if !key.ends_with('.') {
        key.push('.');
    }
    key
}

impl PassiveCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
            store: None,
        }
    }

    pub fn with_store(store: Arc<dyn PtrStore>) -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
            store: Some(store),
        }
    }

    /// Scans the whole store into memory. Call once, before serving.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<usize, DomainError> {
        let Some(store) = &self.store else {
            return Ok(0);
        };

        let records = store.load_all().await?;
        let count = records.len();
        for (reverse_name, forward_name) in records {
            self.entries
                .insert(cache_key(&reverse_name), Arc::from(forward_name));
        }

        info!(records = count, "Passive cache loaded from store");
        Ok(count)
    }

    pub fn lookup(&self, reverse_name: &str) -> Option<Arc<str>> {
        self.entries
            .get(&cache_key(reverse_name))
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Records `reverse_name -> forward_name`, replacing any earlier
    /// mapping. The memory update always happens; the returned error only
    /// reports a failed store write.
    pub async fn remember(
        &self,
        reverse_name: &str,
        forward_name: &str,
    ) -> Result<(), DomainError> {
        let key = cache_key(reverse_name);
        self.entries.insert(key.clone(), Arc::from(forward_name));

        if let Some(store) = &self.store {
            if let Err(e) = store.put(&key, forward_name).await {
                warn!(error = %e, reverse = %key, "Failed to persist passive record");
                return Err(e);
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PassiveCache {
    fn default() -> Self {
        Self::new()
    }
}
