//! redb-backed durable store for passive PTR records.
//!
//! The process holds the database exclusively. Each `put` is its own
//! committed write transaction, run on the blocking pool so fsync never
//! stalls the runtime.

use async_trait::async_trait;
use passdns_application::ports::PtrStore;
use passdns_domain::DomainError;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

const PTR_TABLE: TableDefinition<&str, &str> = TableDefinition::new("ptr");

fn persistence(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::Persistence(format!("{}: {}", context, e))
}

pub struct RedbPtrStore {
    db: Arc<Database>,
}

impl RedbPtrStore {
    /// Opens the database at `path`, creating the file and table if absent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let db = Database::create(path).map_err(|e| persistence("failed to open database", e))?;

        let write_txn = db
            .begin_write()
            .map_err(|e| persistence("failed to begin transaction", e))?;
        write_txn
            .open_table(PTR_TABLE)
            .map_err(|e| persistence("failed to create ptr table", e))?;
        write_txn
            .commit()
            .map_err(|e| persistence("failed to commit", e))?;

        info!(path = %path.display(), "Passive record store opened");
        Ok(Self { db: Arc::new(db) })
    }

    fn scan(db: &Database) -> Result<Vec<(String, String)>, DomainError> {
        let read_txn = db
            .begin_read()
            .map_err(|e| persistence("failed to begin read", e))?;
        let table = read_txn
            .open_table(PTR_TABLE)
            .map_err(|e| persistence("failed to open table", e))?;

        let mut records = Vec::new();
        for entry in table.iter().map_err(|e| persistence("iter failed", e))? {
            let (key, value) = entry.map_err(|e| persistence("entry read failed", e))?;
            records.push((key.value().to_string(), value.value().to_string()));
        }
        Ok(records)
    }

    fn insert(db: &Database, reverse_name: &str, forward_name: &str) -> Result<(), DomainError> {
        let write_txn = db
            .begin_write()
            .map_err(|e| persistence("failed to begin write", e))?;
        {
            let mut table = write_txn
                .open_table(PTR_TABLE)
                .map_err(|e| persistence("failed to open table", e))?;
            table
                .insert(reverse_name, forward_name)
                .map_err(|e| persistence("insert failed", e))?;
        }
        write_txn
            .commit()
            .map_err(|e| persistence("failed to commit", e))
    }
}

#[async_trait]
impl PtrStore for RedbPtrStore {
    async fn load_all(&self) -> Result<Vec<(String, String)>, DomainError> {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || Self::scan(&db))
            .await
            .map_err(|e| persistence("store task failed", e))?
    }

    async fn put(&self, reverse_name: &str, forward_name: &str) -> Result<(), DomainError> {
        let db = Arc::clone(&self.db);
        let reverse_name = reverse_name.to_string();
        let forward_name = forward_name.to_string();

        tokio::task::spawn_blocking(move || {
            Self::insert(&db, &reverse_name, &forward_name)?;
            debug!(reverse = %reverse_name, forward = %forward_name, "Passive record persisted");
            Ok(())
        })
        .await
        .map_err(|e| persistence("store task failed", e))?
    }
}
