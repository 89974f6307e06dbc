use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Durable PTR store. Empty keeps the passive cache in memory only.
    #[serde(default)]
    pub path: String,
}

impl StoreConfig {
    pub fn enabled(&self) -> bool {
        !self.path.is_empty()
    }
}
