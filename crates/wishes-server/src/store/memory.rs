use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use wishes_core::WishRecord;

use super::{StoreError, WishStore};

#[derive(Default)]
struct MemInner {
    records: Vec<WishRecord>,
    names: HashSet<String>,
}

/// In-memory `WishStore`.
///
/// Intended for tests and local runs; not persisted across restarts. Clones
/// share the same records.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemInner>>,
    available: Arc<AtomicBool>,
    insert_attempts: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemInner::default())),
            available: Arc::new(AtomicBool::new(true)),
            insert_attempts: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Simulate losing (or regaining) the connection to the store.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of `insert` calls that reached the store, successful or not.
    pub fn insert_attempts(&self) -> usize {
        self.insert_attempts.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("memory store disconnected".into()))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WishStore for MemoryStore {
    async fn insert(&self, record: WishRecord) -> Result<WishRecord, StoreError> {
        self.insert_attempts.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        // Check and insert under one write guard so racing inserts of the same
        // name cannot both succeed.
        let mut g = self.inner.write().await;
        if !g.names.insert(record.name.clone()) {
            return Err(StoreError::Duplicate(record.name));
        }
        g.records.push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<WishRecord>, StoreError> {
        self.check_available()?;
        Ok(self.inner.read().await.records.clone())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wishes_core::{validate_new_wish, NewWish, WishStatus};

    fn record(name: &str) -> WishRecord {
        WishRecord::new(validate_new_wish(NewWish::new(name, "A bicycle")).unwrap())
    }

    #[tokio::test]
    async fn insert_then_list() {
        let store = MemoryStore::new();
        assert!(store.list().await.unwrap().is_empty());

        store.insert(record("Alice")).await.unwrap();
        store.insert(record("Bob")).await.unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Alice");
        assert_eq!(all[1].status, WishStatus::INITIAL);
    }

    #[tokio::test]
    async fn duplicate_name_rejected() {
        let store = MemoryStore::new();
        store.insert(record("Alice")).await.unwrap();

        let err = store.insert(record("Alice")).await.unwrap_err();
        assert_eq!(err, StoreError::Duplicate("Alice".into()));
        assert_eq!(store.list().await.unwrap().len(), 1);
        assert_eq!(store.insert_attempts(), 2);
    }

    #[tokio::test]
    async fn names_are_case_sensitive() {
        let store = MemoryStore::new();
        store.insert(record("alice")).await.unwrap();
        store.insert(record("Alice")).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn disconnected_store_fails_everything() {
        let store = MemoryStore::new();
        store.set_available(false);

        assert!(matches!(store.ping().await, Err(StoreError::Unavailable(_))));
        assert!(matches!(store.list().await, Err(StoreError::Unavailable(_))));
        assert!(matches!(
            store.insert(record("Alice")).await,
            Err(StoreError::Unavailable(_))
        ));

        store.set_available(true);
        assert!(store.ping().await.is_ok());
        assert!(store.list().await.unwrap().is_empty());
    }
}
