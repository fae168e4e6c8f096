//! georemind - location-triggered reminders.
//!
//! Reminders are kept in a [`ReminderStore`] and reached through an async
//! [`ReminderRepository`]. A [`TransitionHandler`] receives geofence
//! transition events, looks up the reminder behind each trigger, and hands
//! it to a [`NotificationSink`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use georemind::{
//!     ReminderRecord, ReminderRepository, SqliteReminderStore, TracingSink,
//!     TransitionEvent, TransitionHandler,
//! };
//!
//! # async fn run() -> Result<(), georemind::Error> {
//! let store = SqliteReminderStore::open("reminders.db".as_ref())?;
//! let repository = ReminderRepository::new(Arc::new(store));
//!
//! repository
//!     .save(ReminderRecord::with_id("42", "Pharmacy").location("Main St"))
//!     .await?;
//!
//! let handler = TransitionHandler::new(
//!     repository,
//!     Arc::new(TracingSink),
//!     tokio::runtime::Handle::current(),
//!     8,
//! );
//! let outcomes = handler.on_event(TransitionEvent::entered(["42"])).join().await;
//! assert_eq!(outcomes.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod config;
pub mod errors;
pub mod logging;
pub mod notify;
pub mod output;
pub mod reminder_types;
pub mod repository;
mod sqlite;
pub mod store;
pub mod transition;

// Re-export public API
pub use config::Config;
pub use errors::Error;
pub use notify::{JsonLinesSink, NotificationSink, TracingSink};
pub use reminder_types::{FailureKind, ReminderRecord, StoreFailure, StoreResult};
pub use repository::ReminderRepository;
pub use sqlite::SqliteReminderStore;
pub use store::{MemoryReminderStore, ReminderStore};
pub use transition::{
    Dispatch, EventDisposition, TransitionEvent, TransitionHandler, TransitionKind, Trigger,
    TriggerOutcome,
};
