use async_trait::async_trait;
use passdns_domain::DomainError;

/// Durable backing for the passive reverse-name cache.
///
/// Keys are reverse-lookup names, values the forward query name that
/// produced them. Both are opaque strings to the store.
#[async_trait]
pub trait PtrStore: Send + Sync {
    /// Every stored mapping, in store order.
    async fn load_all(&self) -> Result<Vec<(String, String)>, DomainError>;

    /// Insert or overwrite one mapping; returns once it is durable.
    async fn put(&self, reverse_name: &str, forward_name: &str) -> Result<(), DomainError>;
}
