//! `ReminderStore` over a single SQLite connection.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, warn};

use super::{Database, Error};
use crate::errors::Error as CrateError;
use crate::reminder_types::{ReminderRecord, StoreResult};
use crate::store::ReminderStore;

/// Reminder store persisting to SQLite.
///
/// The connection sits behind a mutex, so every statement runs alone and
/// racing writes to one id resolve to whichever committed last.
pub struct SqliteReminderStore {
    db: Mutex<Database>,
}

impl SqliteReminderStore {
    /// Open (or create) the reminder database at `path`.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The path contains `..` components
    /// - The database cannot be opened or its schema created
    pub fn open(path: &Path) -> Result<Self, CrateError> {
        use std::path::Component;

        // Path traversal guard: reject parent directory components
        if path
            .components()
            .any(|component| matches!(component, Component::ParentDir))
        {
            return Err(CrateError::Config(
                "Invalid database path: contains '..' which may escape the intended directory"
                    .to_string(),
            ));
        }

        let db = Database::open(path)?;
        info!(path = %path.display(), "Opened reminder database");
        Ok(Self::from_database(db))
    }

    /// Open a store on a private in-memory SQLite database.
    pub fn open_in_memory() -> Result<Self, CrateError> {
        Ok(Self::from_database(Database::open_in_memory()?))
    }

    pub(crate) fn from_database(db: Database) -> Self {
        Self { db: Mutex::new(db) }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Database>, Error> {
        self.db
            .lock()
            .map_err(|e| Error::LockPoisoned(e.to_string()))
    }
}

impl ReminderStore for SqliteReminderStore {
    fn get_all(&self) -> StoreResult<Vec<ReminderRecord>> {
        match self.lock().and_then(|db| db.list()) {
            Ok(reminders) => StoreResult::Success(reminders),
            Err(e) => {
                warn!(error = %e, "Failed to read reminders");
                StoreResult::backend(e)
            }
        }
    }

    fn save(&self, record: &ReminderRecord) -> Result<(), CrateError> {
        self.lock()?.upsert(record)?;
        debug!(id = %record.id, "Saved reminder");
        Ok(())
    }

    fn get_by_id(&self, id: &str) -> StoreResult<ReminderRecord> {
        match self.lock().and_then(|db| db.get(id)) {
            Ok(Some(record)) => StoreResult::Success(record),
            Ok(None) => StoreResult::not_found(id),
            Err(e) => {
                warn!(id, error = %e, "Failed to read reminder");
                StoreResult::backend(e)
            }
        }
    }

    fn delete_all(&self) -> Result<(), CrateError> {
        let removed = self.lock()?.delete_all()?;
        debug!(removed, "Deleted all reminders");
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), CrateError> {
        let deleted = self.lock()?.delete(id)?;
        debug!(id, deleted, "Deleted reminder");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_open_rejects_path_traversal() {
        let result = SqliteReminderStore::open(&PathBuf::from("../../../etc/reminders.db"));
        assert!(matches!(result, Err(CrateError::Config(_))));
    }

    #[test]
    fn test_open_file_store_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reminders.db");

        {
            let store = SqliteReminderStore::open(&path).unwrap();
            store
                .save(&ReminderRecord::with_id("1", "Pharmacy").coordinates(1.0, 1.0))
                .unwrap();
        }

        let store = SqliteReminderStore::open(&path).unwrap();
        let record = store.get_by_id("1").success().unwrap();
        assert_eq!(record.title, "Pharmacy");
    }

    #[test]
    fn test_unpaired_coordinates_surface_as_invalid_input() {
        let store = SqliteReminderStore::open_in_memory().unwrap();
        let mut record = ReminderRecord::with_id("1", "x");
        record.latitude = Some(1.0);

        assert!(matches!(store.save(&record), Err(CrateError::InvalidInput(_))));
    }
}
