//! Event domain model.
//!
//! # Responsibility
//! - Define the stored `Event` record and its insertion payload `NewEvent`.
//! - Provide typed identifiers so callers never re-derive ids from text.
//!
//! # Invariants
//! - `EventId` values are assigned by the store, strictly increasing, never
//!   reused.
//! - `date` is opaque to storage; only its `YYYY-MM-DD` shape is checked,
//!   and only by `NewEvent::validate()`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static DATE_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date regex"));

/// Store-assigned identifier of one event row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(i64);

impl EventId {
    /// Wraps a raw row id.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw row id used in SQL parameters.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for EventId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Text that cannot name an event id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedIdentifier {
    pub input: String,
}

impl Display for MalformedIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed event identifier `{}`", self.input)
    }
}

impl Error for MalformedIdentifier {}

impl FromStr for EventId {
    type Err = MalformedIdentifier;

    /// Parses a positive decimal id, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<i64>() {
            Ok(raw) if raw > 0 => Ok(Self(raw)),
            _ => Err(MalformedIdentifier {
                input: s.to_string(),
            }),
        }
    }
}

/// One stored event. Instances handed to callers are owned copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    /// `YYYY-MM-DD` by convention.
    pub date: String,
    pub location: String,
}

impl Event {
    /// Human-readable one-line label, e.g. `1: Meetup on 2024-05-01 at Downtown`.
    pub fn label(&self) -> String {
        format!(
            "{}: {} on {} at {}",
            self.id, self.name, self.date, self.location
        )
    }
}

/// Insertion payload; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub name: String,
    pub date: String,
    pub location: String,
}

/// Field names used in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    Name,
    Date,
    Location,
}

impl EventField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Date => "date",
            Self::Location => "location",
        }
    }
}

/// Boundary validation failure for a `NewEvent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    EmptyField(EventField),
    InvalidDateFormat(String),
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "event {} must not be empty", field.as_str()),
            Self::InvalidDateFormat(value) => {
                write!(f, "event date `{value}` is not in YYYY-MM-DD form")
            }
        }
    }
}

impl Error for EventValidationError {}

impl NewEvent {
    pub fn new(
        name: impl Into<String>,
        date: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            location: location.into(),
        }
    }

    /// Checks the payload before it is submitted to storage.
    ///
    /// # Errors
    /// - `EmptyField` when any field is empty or whitespace-only, checked in
    ///   `name`, `date`, `location` order.
    /// - `InvalidDateFormat` when `date` is not shaped `YYYY-MM-DD`. Calendar
    ///   validity is not checked.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        for (field, value) in [
            (EventField::Name, &self.name),
            (EventField::Date, &self.date),
            (EventField::Location, &self.location),
        ] {
            if value.trim().is_empty() {
                return Err(EventValidationError::EmptyField(field));
            }
        }

        if !DATE_SHAPE_RE.is_match(self.date.trim()) {
            return Err(EventValidationError::InvalidDateFormat(self.date.clone()));
        }

        Ok(())
    }

    /// Returns a copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self::new(self.name.trim(), self.date.trim(), self.location.trim())
    }
}
