//! Notification sinks presenting triggered reminders to the user.

use std::io::Write;
use std::sync::Mutex;

use serde::Serialize;
use tracing::{info, warn};

use crate::reminder_types::ReminderRecord;

/// Presents a triggered reminder. Fire-and-forget: failures stay inside the sink.
///
/// The transition handler calls `present` on the blocking thread pool, so an
/// implementation may block on I/O.
pub trait NotificationSink: Send + Sync {
    fn present(&self, reminder: &ReminderRecord);
}

/// Sink that emits one structured log line per notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn present(&self, reminder: &ReminderRecord) {
        info!(
            id = %reminder.id,
            title = %reminder.title,
            location = reminder.location.as_deref().unwrap_or(""),
            "Reminder triggered"
        );
    }
}

#[derive(Serialize)]
struct NotificationLine<'a> {
    event: &'static str,
    #[serde(flatten)]
    reminder: &'a ReminderRecord,
}

/// Sink writing each notification as a JSON line to a writer.
pub struct JsonLinesSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the writer (for tests and buffered callers).
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_line(&self, reminder: &ReminderRecord) -> Result<(), String> {
        let line = serde_json::to_string(&NotificationLine {
            event: "reminder_triggered",
            reminder,
        })
        .map_err(|e| e.to_string())?;

        let mut writer = self.writer.lock().map_err(|e| e.to_string())?;
        writeln!(writer, "{line}").map_err(|e| e.to_string())?;
        writer.flush().map_err(|e| e.to_string())
    }
}

impl<W: Write + Send> NotificationSink for JsonLinesSink<W> {
    fn present(&self, reminder: &ReminderRecord) {
        if let Err(e) = self.write_line(reminder) {
            warn!(id = %reminder.id, error = %e, "Failed to write notification");
        }
    }
}
