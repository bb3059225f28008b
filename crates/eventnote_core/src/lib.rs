//! Persistence core for the event notes desktop tool.
//! This crate owns every storage invariant: id assignment, ordering and
//! deletion semantics of scheduled events.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{StoreConfig, DEFAULT_DB_FILE_NAME};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::event::{
    Event, EventField, EventId, EventValidationError, MalformedIdentifier, NewEvent,
};
pub use repo::event_repo::{EventRepository, RepoError, RepoResult, SqliteEventRepository};
pub use service::event_service::{EventListItem, EventService, ServiceError, ServiceResult};
pub use store::EventStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
