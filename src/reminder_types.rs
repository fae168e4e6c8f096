//! Reminder data types and the store outcome type.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::Error;

/// A location reminder as persisted by the store.
///
/// Identity is `id`. Every other field is replaced wholesale when a record
/// with the same `id` is saved again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Human-readable label for the selected place.
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl ReminderRecord {
    /// Create a record with a freshly generated v4 UUID.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title)
    }

    /// Create a record with a caller-supplied id.
    pub fn with_id(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            location: None,
            latitude: None,
            longitude: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the coordinate pair. Latitude and longitude are only ever set together.
    pub fn coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Check that the record is complete enough to become a geofence.
    ///
    /// The store never calls this; it is applied by callers that create
    /// reminders from user input.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if:
    /// - The id or title is blank
    /// - No location label was selected
    /// - Only one of latitude/longitude is present
    /// - A coordinate is non-finite or out of range
    pub fn validate(&self) -> Result<(), Error> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidInput("Reminder id cannot be empty".to_string()));
        }
        if self.title.trim().is_empty() {
            return Err(Error::InvalidInput("Please enter title".to_string()));
        }
        if self
            .location
            .as_deref()
            .is_none_or(|label| label.trim().is_empty())
        {
            return Err(Error::InvalidInput("Please select location".to_string()));
        }

        match (self.latitude, self.longitude) {
            (None, None) => Ok(()),
            (Some(lat), Some(lon)) => validate_coordinates(lat, lon),
            _ => Err(Error::InvalidInput(
                "Latitude and longitude must be provided together".to_string(),
            )),
        }
    }
}

fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), Error> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(Error::InvalidInput(
            "Coordinates must be finite numbers".to_string(),
        ));
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::InvalidInput(format!(
            "Invalid latitude: {latitude} (must be between -90 and 90)"
        )));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::InvalidInput(format!(
            "Invalid longitude: {longitude} (must be between -180 and 180)"
        )));
    }
    Ok(())
}

/// Why a read produced no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No record carries the requested id.
    NotFound,
    /// The persistence backend could not be read.
    Backend,
}

/// Failure payload of a [`StoreResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreFailure {
    pub kind: FailureKind,
    pub message: String,
}

/// Outcome of a store read.
///
/// Either `Success` with the value or `Error` with a failure. Callers branch
/// on the variant before touching the payload; `kind` tells a missing record
/// apart from a broken backend without parsing `message`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum StoreResult<T> {
    Success(T),
    Error(StoreFailure),
}

impl<T> StoreResult<T> {
    pub fn not_found(id: &str) -> Self {
        StoreResult::Error(StoreFailure {
            kind: FailureKind::NotFound,
            message: format!("Reminder not found: {id}"),
        })
    }

    pub fn backend(message: impl std::fmt::Display) -> Self {
        StoreResult::Error(StoreFailure {
            kind: FailureKind::Backend,
            message: message.to_string(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StoreResult::Success(_))
    }

    /// Consume the result, keeping the value on success.
    pub fn success(self) -> Option<T> {
        match self {
            StoreResult::Success(value) => Some(value),
            StoreResult::Error(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&StoreFailure> {
        match self {
            StoreResult::Success(_) => None,
            StoreResult::Error(failure) => Some(failure),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> StoreResult<U> {
        match self {
            StoreResult::Success(value) => StoreResult::Success(f(value)),
            StoreResult::Error(failure) => StoreResult::Error(failure),
        }
    }

    /// Convert into a crate error for callers that propagate with `?`.
    pub fn into_result(self) -> Result<T, Error> {
        match self {
            StoreResult::Success(value) => Ok(value),
            StoreResult::Error(StoreFailure {
                kind: FailureKind::NotFound,
                message,
            }) => Err(Error::NotFound(message)),
            StoreResult::Error(StoreFailure {
                kind: FailureKind::Backend,
                message,
            }) => Err(Error::Storage(message)),
        }
    }
}
