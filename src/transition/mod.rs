//! Geofence transition handling.
//!
//! An event source hands [`TransitionEvent`]s to [`TransitionHandler::on_event`],
//! which returns at once. Each trigger is then resolved on its own task: one
//! store lookup, and one notification when the reminder still exists.

mod event;

pub use event::{TransitionEvent, TransitionKind, Trigger};

use std::collections::HashSet;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::notify::NotificationSink;
use crate::reminder_types::{ReminderRecord, StoreResult};
use crate::repository::ReminderRepository;

/// What happened to an event as a whole when it was received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventDisposition {
    /// Triggers were handed to lookup tasks.
    Dispatched { triggers: usize },
    /// The event reported an error; nothing was looked up.
    Malformed { reason: String },
    /// The transition kind never produces notifications.
    Ignored { transition: TransitionKind },
    /// The event carried no trigger ids.
    Empty,
}

/// Final state of one trigger.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerOutcome {
    Notified(ReminderRecord),
    /// Lookup failed; the trigger was discarded.
    Dropped { request_id: String, reason: String },
    /// The trigger task itself died (e.g. the sink panicked).
    Failed { request_id: String, reason: String },
}

/// Handle on the work spawned for one event.
///
/// Dropping it detaches the tasks; they still run to completion.
#[derive(Debug)]
pub struct Dispatch {
    disposition: EventDisposition,
    tasks: Vec<(String, JoinHandle<TriggerOutcome>)>,
}

impl Dispatch {
    fn without_tasks(disposition: EventDisposition) -> Self {
        Self {
            disposition,
            tasks: Vec::new(),
        }
    }

    pub fn disposition(&self) -> &EventDisposition {
        &self.disposition
    }

    /// Wait for every trigger of the event, in trigger order.
    pub async fn join(self) -> Vec<TriggerOutcome> {
        let mut outcomes = Vec::with_capacity(self.tasks.len());
        for (request_id, task) in self.tasks {
            let outcome = task.await.unwrap_or_else(|e| {
                error!(request_id = %request_id, error = %e, "Trigger task failed");
                TriggerOutcome::Failed {
                    request_id,
                    reason: e.to_string(),
                }
            });
            outcomes.push(outcome);
        }
        outcomes
    }
}

/// Resolves transition events to reminders and presents them.
#[derive(Clone)]
pub struct TransitionHandler {
    repository: ReminderRepository,
    sink: Arc<dyn NotificationSink>,
    runtime: Handle,
    permits: Arc<Semaphore>,
}

impl TransitionHandler {
    /// Create a handler that spawns trigger tasks on `runtime`.
    ///
    /// At most `max_concurrent_lookups` triggers (across all events) are
    /// resolved at the same time; the rest wait for a permit inside their
    /// own task, never in `on_event`. A limit of zero is treated as one.
    pub fn new(
        repository: ReminderRepository,
        sink: Arc<dyn NotificationSink>,
        runtime: Handle,
        max_concurrent_lookups: usize,
    ) -> Self {
        Self {
            repository,
            sink,
            runtime,
            permits: Arc::new(Semaphore::new(max_concurrent_lookups.max(1))),
        }
    }

    /// Accept an event from the event source without blocking it.
    ///
    /// Safe to call from inside or outside the runtime.
    pub fn on_event(&self, event: TransitionEvent) -> Dispatch {
        if let Some(reason) = event.error {
            warn!(reason = %reason, "Discarding malformed transition event");
            return Dispatch::without_tasks(EventDisposition::Malformed { reason });
        }

        if event.transition != TransitionKind::Enter {
            debug!(transition = ?event.transition, "Ignoring non-enter transition");
            return Dispatch::without_tasks(EventDisposition::Ignored {
                transition: event.transition,
            });
        }

        let mut seen = HashSet::new();
        let request_ids: Vec<String> = event
            .triggers
            .into_iter()
            .map(|trigger| trigger.request_id)
            .filter(|request_id| seen.insert(request_id.clone()))
            .collect();

        if request_ids.is_empty() {
            debug!("Transition event carried no triggers");
            return Dispatch::without_tasks(EventDisposition::Empty);
        }

        let tasks = request_ids
            .into_iter()
            .map(|request_id| {
                let task = self.runtime.spawn(resolve_trigger(
                    self.repository.clone(),
                    Arc::clone(&self.sink),
                    Arc::clone(&self.permits),
                    request_id.clone(),
                ));
                (request_id, task)
            })
            .collect::<Vec<_>>();

        Dispatch {
            disposition: EventDisposition::Dispatched {
                triggers: tasks.len(),
            },
            tasks,
        }
    }
}

async fn resolve_trigger(
    repository: ReminderRepository,
    sink: Arc<dyn NotificationSink>,
    permits: Arc<Semaphore>,
    request_id: String,
) -> TriggerOutcome {
    // Held until the notification has been presented.
    let _permit = match permits.acquire_owned().await {
        Ok(permit) => permit,
        Err(e) => {
            return TriggerOutcome::Failed {
                request_id,
                reason: e.to_string(),
            };
        }
    };

    match repository.get_by_id(&request_id).await {
        StoreResult::Success(reminder) => {
            // Sinks may block on I/O.
            let presented = reminder.clone();
            match tokio::task::spawn_blocking(move || sink.present(&presented)).await {
                Ok(()) => {
                    debug!(request_id = %request_id, "Presented reminder");
                    TriggerOutcome::Notified(reminder)
                }
                Err(e) => {
                    error!(request_id = %request_id, error = %e, "Notification sink failed");
                    TriggerOutcome::Failed {
                        request_id,
                        reason: e.to_string(),
                    }
                }
            }
        }
        StoreResult::Error(failure) => {
            debug!(
                request_id = %request_id,
                kind = ?failure.kind,
                message = %failure.message,
                "Dropping trigger"
            );
            TriggerOutcome::Dropped {
                request_id,
                reason: failure.message,
            }
        }
    }
}
