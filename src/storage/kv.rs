use crate::core::config::Config;
use crate::core::error::{Error, Result};
use redb::{Database, ReadableTable, TableDefinition};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// Table definition for the key-value blobs
/// Using &str for both key and value (JSON serialized)
const KV_TABLE: TableDefinition<&str, &str> = TableDefinition::new("kv");

/// Minimal get/set contract of the storage backend. Shared across threads
/// behind a [`DashboardStore`](crate::storage::dashboard::DashboardStore).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

fn check_quota(quota: Option<usize>, key: &str, value: &str) -> Result<()> {
    match quota {
        // The browser sync store counts key and value toward the item quota.
        Some(quota) if key.len() + value.len() > quota => Err(Error::StorageQuota {
            size: key.len() + value.len(),
            quota,
        }),
        _ => Ok(()),
    }
}

/// Key-value store backed by a redb database file
pub struct RedbStore {
    db: Database,
    quota: Option<usize>,
}

impl RedbStore {
    /// Open or create the store at `path`
    pub fn open(path: &Path, quota: Option<usize>) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = if path.exists() {
            Database::open(path).map_err(|e| {
                let msg = e.to_string();
                if msg.to_lowercase().contains("lock") {
                    Error::Database("Store is locked. Another marklog process may be running. Close other instances and try again.".to_string())
                } else {
                    Error::Database(format!("Failed to open store {}: {}", path.display(), e))
                }
            })?
        } else {
            Database::create(path).map_err(|e| {
                Error::Database(format!("Failed to create store {}: {}", path.display(), e))
            })?
        };

        // Initialize table (this is safe even if table already exists)
        let write_txn = db.begin_write().map_err(|e| {
            Error::Database(format!("Failed to begin write transaction: {}", e))
        })?;
        {
            let _table = write_txn
                .open_table(KV_TABLE)
                .map_err(|e| Error::Database(format!("Failed to open table: {}", e)))?;
        }
        write_txn
            .commit()
            .map_err(|e| Error::Database(format!("Failed to commit transaction: {}", e)))?;

        Ok(Self { db, quota })
    }

    /// The synchronized store, limited to the configured per-item quota
    pub fn open_sync(config: &Config) -> Result<Self> {
        Self::open(&config.sync_db_path, Some(config.sync_quota_bytes))
    }

    /// The local-only store, without a quota
    pub fn open_local(config: &Config) -> Result<Self> {
        Self::open(&config.local_db_path, None)
    }
}

impl KeyValueStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let read_txn = self.db.begin_read().map_err(|e| {
            Error::Database(format!("Failed to begin read transaction: {}", e))
        })?;

        let table = read_txn
            .open_table(KV_TABLE)
            .map_err(|e| Error::Database(format!("Failed to open table: {}", e)))?;

        let value = table
            .get(key)
            .map_err(|e| Error::Database(format!("Failed to read {}: {}", key, e)))?
            .map(|guard| guard.value().to_string());
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        check_quota(self.quota, key, value)?;

        let write_txn = self.db.begin_write().map_err(|e| {
            Error::Database(format!("Failed to begin write transaction: {}", e))
        })?;
        {
            let mut table = write_txn
                .open_table(KV_TABLE)
                .map_err(|e| Error::Database(format!("Failed to open table: {}", e)))?;
            table
                .insert(key, value)
                .map_err(|e| Error::Database(format!("Failed to write {}: {}", key, e)))?;
        }
        write_txn
            .commit()
            .map_err(|e| Error::Database(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let write_txn = self.db.begin_write().map_err(|e| {
            Error::Database(format!("Failed to begin write transaction: {}", e))
        })?;
        {
            let mut table = write_txn
                .open_table(KV_TABLE)
                .map_err(|e| Error::Database(format!("Failed to open table: {}", e)))?;
            table
                .remove(key)
                .map_err(|e| Error::Database(format!("Failed to remove {}: {}", key, e)))?;
        }
        write_txn
            .commit()
            .map_err(|e| Error::Database(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }
}

/// In-process store, handy for tests and dry runs
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: Mutex::default(),
            quota: Some(quota),
        }
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| Error::Database("Memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        check_quota(self.quota, key, value)?;
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}
