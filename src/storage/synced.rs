use crate::core::error::{Error, Result};
use crate::storage::kv::KeyValueStore;
use tracing::{debug, warn};

/// A synchronized primary store with a local-only fallback.
///
/// Writes go to the primary. When the primary refuses a value for being too
/// large, the value goes to the secondary and the stale primary copy is
/// dropped, so reads (primary first) never see an outdated blob. Callers are
/// not told which store ended up holding the value.
pub struct SyncedStore {
    primary: Box<dyn KeyValueStore>,
    secondary: Box<dyn KeyValueStore>,
}

impl SyncedStore {
    pub fn new(primary: Box<dyn KeyValueStore>, secondary: Box<dyn KeyValueStore>) -> Self {
        Self { primary, secondary }
    }
}

impl KeyValueStore for SyncedStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.primary.get(key)? {
            Some(value) => Ok(Some(value)),
            None => self.secondary.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        match self.primary.set(key, value) {
            Ok(()) => {
                self.secondary.remove(key)?;
                debug!(key, bytes = value.len(), "stored in sync store");
                Ok(())
            }
            Err(Error::StorageQuota { size, quota }) => {
                warn!(key, size, quota, "sync store quota exceeded, using local store");
                self.secondary.set(key, value)?;
                self.primary.remove(key)?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.primary.remove(key)?;
        self.secondary.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::kv::MemoryStore;
    use std::sync::Arc;

    /// Shares one `MemoryStore` between the synced store and the test.
    struct Shared(Arc<MemoryStore>);

    impl KeyValueStore for Shared {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key)
        }
        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.0.set(key, value)
        }
        fn remove(&self, key: &str) -> Result<()> {
            self.0.remove(key)
        }
    }

    fn synced(quota: usize) -> (SyncedStore, Arc<MemoryStore>, Arc<MemoryStore>) {
        let primary = Arc::new(MemoryStore::with_quota(quota));
        let secondary = Arc::new(MemoryStore::new());
        let store = SyncedStore::new(
            Box::new(Shared(primary.clone())),
            Box::new(Shared(secondary.clone())),
        );
        (store, primary, secondary)
    }

    #[test]
    fn test_small_values_go_to_primary() {
        let (store, primary, secondary) = synced(64);
        store.set("k", "small").unwrap();

        assert_eq!(primary.get("k").unwrap(), Some("small".to_string()));
        assert_eq!(secondary.get("k").unwrap(), None);
        assert_eq!(store.get("k").unwrap(), Some("small".to_string()));
    }

    #[test]
    fn test_quota_falls_back_to_secondary() {
        let (store, primary, secondary) = synced(16);
        store.set("k", "small").unwrap();

        let big = "x".repeat(100);
        store.set("k", &big).unwrap();

        assert_eq!(primary.get("k").unwrap(), None);
        assert_eq!(secondary.get("k").unwrap(), Some(big.clone()));
        assert_eq!(store.get("k").unwrap(), Some(big));
    }

    #[test]
    fn test_shrinking_value_moves_back_to_primary() {
        let (store, primary, secondary) = synced(16);
        store.set("k", &"x".repeat(100)).unwrap();
        store.set("k", "tiny").unwrap();

        assert_eq!(primary.get("k").unwrap(), Some("tiny".to_string()));
        assert_eq!(secondary.get("k").unwrap(), None);
        assert_eq!(store.get("k").unwrap(), Some("tiny".to_string()));
    }

    #[test]
    fn test_remove_clears_both() {
        let (store, _, _) = synced(16);
        store.set("a", &"x".repeat(100)).unwrap();
        store.set("b", "y").unwrap();
        store.remove("a").unwrap();
        store.remove("b").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap(), None);
    }
}
