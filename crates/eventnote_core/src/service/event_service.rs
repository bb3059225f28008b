//! Event use-case service.
//!
//! # Responsibility
//! - Provide the caller-facing entry points used by a presentation layer.
//! - Reject incomplete drafts before any repository call.
//! - Produce display rows that carry typed ids alongside their labels.
//!
//! # Invariants
//! - A draft failing `NewEvent::validate()` never reaches the repository.
//! - Deletion is keyed by `EventId`, never by a rendered label.

use crate::model::event::{Event, EventId, EventValidationError, NewEvent};
use crate::repo::event_repo::{EventRepository, RepoError};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure surfaced to the presentation layer.
#[derive(Debug)]
pub enum ServiceError {
    /// Draft was incomplete or malformed; nothing was stored.
    Validation(EventValidationError),
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<EventValidationError> for ServiceError {
    fn from(value: EventValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// One row of the event list as shown to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventListItem {
    /// Id to pass back to `EventService::delete_event`.
    pub id: EventId,
    /// `"{id}: {name} on {date} at {location}"`.
    pub label: String,
}

impl From<&Event> for EventListItem {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            label: event.label(),
        }
    }
}

/// Use-case wrapper over an event repository.
pub struct EventService<R: EventRepository> {
    repo: R,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and stores one event draft.
    ///
    /// # Contract
    /// - Surrounding whitespace is trimmed from every field before storage.
    /// - Returns `ServiceError::Validation` without touching storage when the
    ///   draft is incomplete.
    pub fn create_event(&self, draft: &NewEvent) -> ServiceResult<EventId> {
        if let Err(err) = draft.validate() {
            warn!("event=event_create module=service status=rejected error={err}");
            return Err(err.into());
        }

        Ok(self.repo.create_event(&draft.trimmed())?)
    }

    pub fn get_event(&self, id: EventId) -> ServiceResult<Option<Event>> {
        Ok(self.repo.get_event(id)?)
    }

    /// Lists stored events by ascending id.
    pub fn list_events(&self) -> ServiceResult<Vec<Event>> {
        Ok(self.repo.list_events()?)
    }

    /// Lists display rows by ascending id.
    pub fn list_items(&self) -> ServiceResult<Vec<EventListItem>> {
        let events = self.repo.list_events()?;
        Ok(events.iter().map(EventListItem::from).collect())
    }

    /// Deletes one event. Returns `false` when it was already absent.
    pub fn delete_event(&self, id: EventId) -> ServiceResult<bool> {
        Ok(self.repo.delete_event(id)?)
    }

    /// Gives back the wrapped repository.
    pub fn into_inner(self) -> R {
        self.repo
    }
}
