//! SQLite backend for georemind reminder storage.
//!
//! This module provides:
//! - `Database`: SQLite connection, schema management and row-level CRUD
//! - `SqliteReminderStore`: a `ReminderStore` serializing access to one `Database`

mod store;

use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::path::Path;

use crate::reminder_types::ReminderRecord;

pub use self::store::SqliteReminderStore;

/// Error types for SQLite operations.
#[derive(Debug)]
pub enum Error {
    Sqlite(rusqlite::Error),
    LockPoisoned(String),
    UnpairedCoordinates(String),
    NonFiniteCoordinates(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Sqlite(err) => write!(f, "Database error: {}", err),
            Error::LockPoisoned(msg) => write!(f, "Database lock poisoned: {}", msg),
            Error::UnpairedCoordinates(id) => {
                write!(f, "Reminder {} has only one of latitude/longitude", id)
            }
            Error::NonFiniteCoordinates(id) => {
                write!(f, "Reminder {} has a NaN or infinite coordinate", id)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Sqlite(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// SQLite database backend for georemind.
pub struct Database {
    conn: Connection,
}

/// Initialize database schema.
fn create_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS reminders (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            description TEXT,
            location TEXT,
            latitude REAL,
            longitude REAL,
            CHECK ((latitude IS NULL) = (longitude IS NULL))
        );
        "#,
    )?;
    Ok(())
}

fn reminder_from_row(row: &Row<'_>) -> SqliteResult<ReminderRecord> {
    Ok(ReminderRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        location: row.get(3)?,
        latitude: row.get(4)?,
        longitude: row.get(5)?,
    })
}

impl Database {
    /// Open or create a SQLite database at the given path.
    ///
    /// Initializes the schema if the database is new.
    ///
    /// # Errors
    ///
    /// Returns error if the database cannot be opened or schema initialization fails.
    pub fn open(path: &Path) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        create_schema(&mut conn)?;
        Ok(Self { conn })
    }

    /// Open a private in-memory database (for tests and dry runs).
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        create_schema(&mut conn)?;
        Ok(Self { conn })
    }

    /// Insert a reminder, replacing every field of an existing row with the same id.
    ///
    /// The row keeps its original position in `list` order when replaced.
    ///
    /// # Errors
    ///
    /// Returns error if the coordinates are unpaired or not finite, or the write fails.
    /// SQLite binds NaN as NULL, so non-finite values never reach the table.
    pub fn upsert(&self, record: &ReminderRecord) -> Result<()> {
        match (record.latitude, record.longitude) {
            (Some(lat), Some(lon)) if !lat.is_finite() || !lon.is_finite() => {
                return Err(Error::NonFiniteCoordinates(record.id.clone()));
            }
            (Some(_), None) | (None, Some(_)) => {
                return Err(Error::UnpairedCoordinates(record.id.clone()));
            }
            _ => {}
        }

        self.conn.execute(
            r#"
            INSERT INTO reminders (id, title, description, location, latitude, longitude)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                location = excluded.location,
                latitude = excluded.latitude,
                longitude = excluded.longitude
            "#,
            params![
                &record.id,
                &record.title,
                &record.description,
                &record.location,
                record.latitude,
                record.longitude
            ],
        )?;

        Ok(())
    }

    /// Retrieve a single reminder by ID.
    ///
    /// Returns None if the reminder does not exist.
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails.
    pub fn get(&self, id: &str) -> Result<Option<ReminderRecord>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT id, title, description, location, latitude, longitude
            FROM reminders
            WHERE id = ?1
            "#,
        )?;

        let result = stmt.query_row([id], reminder_from_row).optional()?;

        Ok(result)
    }

    /// List every reminder in first-insertion order.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub fn list(&self) -> Result<Vec<ReminderRecord>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT id, title, description, location, latitude, longitude
            FROM reminders
            ORDER BY rowid ASC
            "#,
        )?;

        let reminders: SqliteResult<Vec<ReminderRecord>> =
            stmt.query_map([], reminder_from_row)?.collect();

        Ok(reminders?)
    }

    /// Delete a reminder by ID.
    ///
    /// Returns true if a reminder was deleted, false if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM reminders WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }

    /// Delete every reminder, returning how many rows were removed.
    ///
    /// # Errors
    ///
    /// Returns error if the database query fails.
    pub fn delete_all(&self) -> Result<usize> {
        Ok(self.conn.execute("DELETE FROM reminders", [])?)
    }

    /// Get internal connection (for tests).
    #[cfg(test)]
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}
