//! In-memory reminder store.

use std::sync::RwLock;

use tracing::debug;

use super::ReminderStore;
use crate::errors::Error;
use crate::reminder_types::{ReminderRecord, StoreResult};

/// Reminder store backed by a vector behind a read/write lock.
///
/// Keeps first-insertion order; replacing a record keeps its slot.
#[derive(Default)]
pub struct MemoryReminderStore {
    reminders: RwLock<Vec<ReminderRecord>>,
}

impl MemoryReminderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `records` (later duplicates win).
    pub fn with_records(records: impl IntoIterator<Item = ReminderRecord>) -> Self {
        let store = Self::new();
        if let Ok(mut reminders) = store.reminders.write() {
            for record in records {
                upsert(&mut reminders, record);
            }
        }
        store
    }
}

fn upsert(reminders: &mut Vec<ReminderRecord>, record: ReminderRecord) {
    match reminders.iter_mut().find(|r| r.id == record.id) {
        Some(existing) => *existing = record,
        None => reminders.push(record),
    }
}

/// Same coordinate rules the SQLite backend enforces.
fn check_coordinates(record: &ReminderRecord) -> Result<(), Error> {
    match (record.latitude, record.longitude) {
        (Some(lat), Some(lon)) if !lat.is_finite() || !lon.is_finite() => Err(Error::InvalidInput(
            format!("Reminder {} has a NaN or infinite coordinate", record.id),
        )),
        (Some(_), None) | (None, Some(_)) => Err(Error::InvalidInput(format!(
            "Reminder {} has only one of latitude/longitude",
            record.id
        ))),
        _ => Ok(()),
    }
}

fn lock_error(e: impl std::fmt::Display) -> Error {
    Error::Storage(format!("Lock error: {}", e))
}

impl ReminderStore for MemoryReminderStore {
    fn get_all(&self) -> StoreResult<Vec<ReminderRecord>> {
        match self.reminders.read() {
            Ok(reminders) => StoreResult::Success(reminders.clone()),
            Err(e) => StoreResult::backend(lock_error(e)),
        }
    }

    fn save(&self, record: &ReminderRecord) -> Result<(), Error> {
        check_coordinates(record)?;
        let mut reminders = self.reminders.write().map_err(lock_error)?;
        upsert(&mut reminders, record.clone());
        debug!(id = %record.id, "Saved reminder in memory");
        Ok(())
    }

    fn get_by_id(&self, id: &str) -> StoreResult<ReminderRecord> {
        let reminders = match self.reminders.read() {
            Ok(reminders) => reminders,
            Err(e) => return StoreResult::backend(lock_error(e)),
        };

        match reminders.iter().find(|r| r.id == id) {
            Some(record) => StoreResult::Success(record.clone()),
            None => StoreResult::not_found(id),
        }
    }

    fn delete_all(&self) -> Result<(), Error> {
        self.reminders.write().map_err(lock_error)?.clear();
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), Error> {
        self.reminders
            .write()
            .map_err(lock_error)?
            .retain(|r| r.id != id);
        Ok(())
    }
}
