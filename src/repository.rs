//! Async access to a shared reminder store.
//!
//! Store calls block (SQLite I/O, lock waits), so each one is moved onto the
//! runtime's blocking pool. The UI-facing command path and the transition
//! handler hold clones of one repository and therefore one store.

use std::sync::Arc;

use tracing::error;

use crate::errors::Error;
use crate::reminder_types::{ReminderRecord, StoreResult};
use crate::store::ReminderStore;

/// Cloneable async facade over an `Arc<dyn ReminderStore>`.
#[derive(Clone)]
pub struct ReminderRepository {
    store: Arc<dyn ReminderStore>,
}

impl ReminderRepository {
    pub fn new(store: Arc<dyn ReminderStore>) -> Self {
        Self { store }
    }

    async fn offload<T, F>(&self, op: F) -> Result<T, Error>
    where
        F: FnOnce(&dyn ReminderStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| {
                error!(error = %e, "Store task failed");
                Error::Runtime(format!("Store task failed: {e}"))
            })
    }

    pub async fn get_all(&self) -> StoreResult<Vec<ReminderRecord>> {
        self.offload(|store| store.get_all())
            .await
            .unwrap_or_else(StoreResult::backend)
    }

    pub async fn save(&self, record: ReminderRecord) -> Result<(), Error> {
        self.offload(move |store| store.save(&record)).await?
    }

    pub async fn get_by_id(&self, id: &str) -> StoreResult<ReminderRecord> {
        let id = id.to_string();
        self.offload(move |store| store.get_by_id(&id))
            .await
            .unwrap_or_else(StoreResult::backend)
    }

    pub async fn delete_all(&self) -> Result<(), Error> {
        self.offload(|store| store.delete_all()).await?
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        let id = id.to_string();
        self.offload(move |store| store.delete(&id)).await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder_types::FailureKind;
    use crate::store::MemoryReminderStore;

    /// Store whose reads panic, standing in for a crashed backend call.
    struct PanickingStore;

    impl ReminderStore for PanickingStore {
        fn get_all(&self) -> StoreResult<Vec<ReminderRecord>> {
            panic!("backend crashed")
        }
        fn save(&self, _record: &ReminderRecord) -> Result<(), Error> {
            panic!("backend crashed")
        }
        fn get_by_id(&self, _id: &str) -> StoreResult<ReminderRecord> {
            panic!("backend crashed")
        }
        fn delete_all(&self) -> Result<(), Error> {
            Ok(())
        }
        fn delete(&self, _id: &str) -> Result<(), Error> {
            Ok(())
        }
    }

    fn repository() -> ReminderRepository {
        ReminderRepository::new(Arc::new(MemoryReminderStore::new()))
    }

    #[tokio::test]
    async fn test_delegates_crud_to_store() {
        let repo = repository();
        let record = ReminderRecord::with_id("1", "Pharmacy").coordinates(1.0, 1.0);

        repo.save(record.clone()).await.unwrap();
        assert_eq!(repo.get_by_id("1").await, StoreResult::Success(record.clone()));
        assert_eq!(repo.get_all().await, StoreResult::Success(vec![record]));

        repo.delete("1").await.unwrap();
        assert!(!repo.get_by_id("1").await.is_success());

        repo.save(ReminderRecord::with_id("2", "Gym")).await.unwrap();
        repo.delete_all().await.unwrap();
        assert_eq!(repo.get_all().await, StoreResult::Success(vec![]));
    }

    #[tokio::test]
    async fn test_clones_share_one_store() {
        let repo = repository();
        let other = repo.clone();

        repo.save(ReminderRecord::with_id("1", "Pharmacy")).await.unwrap();
        assert!(other.get_by_id("1").await.is_success());
    }

    #[tokio::test]
    async fn test_panicking_read_becomes_backend_error() {
        let repo = ReminderRepository::new(Arc::new(PanickingStore));

        let result = repo.get_by_id("1").await;
        assert_eq!(result.failure().map(|f| f.kind), Some(FailureKind::Backend));

        let all = repo.get_all().await;
        assert_eq!(all.failure().map(|f| f.kind), Some(FailureKind::Backend));
    }

    #[tokio::test]
    async fn test_panicking_save_becomes_runtime_error() {
        let repo = ReminderRepository::new(Arc::new(PanickingStore));
        let result = repo.save(ReminderRecord::with_id("1", "x")).await;
        assert!(matches!(result, Err(Error::Runtime(_))));
    }
}
