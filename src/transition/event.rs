//! Transition event types as delivered by an event source.

use serde::{Deserialize, Serialize};

/// Kind of geofence transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    #[default]
    Enter,
    Exit,
    Dwell,
}

/// One geofence that fired; `request_id` is the id of a reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    pub request_id: String,
}

/// A batch of geofences that fired together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEvent {
    #[serde(default)]
    pub transition: TransitionKind,
    #[serde(default)]
    pub triggers: Vec<Trigger>,
    /// Set by the event source when it could not produce a valid event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TransitionEvent {
    /// An `enter` event for the given reminder ids.
    pub fn entered<I, S>(request_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            transition: TransitionKind::Enter,
            triggers: request_ids
                .into_iter()
                .map(|id| Trigger {
                    request_id: id.into(),
                })
                .collect(),
            error: None,
        }
    }

    /// An event the source flagged as broken.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self {
            transition: TransitionKind::Enter,
            triggers: Vec::new(),
            error: Some(reason.into()),
        }
    }

    pub fn with_transition(mut self, transition: TransitionKind) -> Self {
        self.transition = transition;
        self
    }
}
