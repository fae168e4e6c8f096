//! The reminder store contract and its in-memory backend.
//!
//! Reads return [`StoreResult`] because a missing reminder is an expected
//! outcome the caller must branch on. Mutations return `Result<(), Error>`
//! where `Err` means the backend failed or the record cannot be stored as
//! given; deleting an absent id or clearing an empty store succeeds.

mod memory;

pub use memory::MemoryReminderStore;

use crate::errors::Error;
use crate::reminder_types::{ReminderRecord, StoreResult};

/// Keyed CRUD storage for reminders.
///
/// Implementations are shared across threads and must make every mutation
/// atomic: a concurrent reader sees a record either as it was before a
/// `save` or exactly as saved.
pub trait ReminderStore: Send + Sync {
    /// Every stored reminder, in an order that is stable while the store is unchanged.
    fn get_all(&self) -> StoreResult<Vec<ReminderRecord>>;

    /// Insert the record, or replace all fields of the record with the same id.
    ///
    /// Coordinates must be paired and finite, otherwise `Error::InvalidInput`
    /// is returned and nothing is written.
    fn save(&self, record: &ReminderRecord) -> Result<(), Error>;

    fn get_by_id(&self, id: &str) -> StoreResult<ReminderRecord>;

    /// Remove every reminder.
    fn delete_all(&self) -> Result<(), Error>;

    /// Remove the reminder with `id` if present.
    fn delete(&self, id: &str) -> Result<(), Error>;
}
