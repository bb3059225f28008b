//! Owned event store handle.
//!
//! # Responsibility
//! - Own the single long-lived connection to the event database.
//! - Expose initialize/insert/list/delete as the durable CRUD surface.
//!
//! # Invariants
//! - A constructed store always has the `events` schema in place.
//! - Each write is a single statement: it commits fully or not at all.
//! - The connection is released on `close()` or drop; there is no global
//!   handle.

use crate::config::StoreConfig;
use crate::db::migrations::apply_migrations;
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::event::{Event, EventId, NewEvent};
use crate::repo::event_repo::{EventRepository, RepoResult, SqliteEventRepository};
use log::{error, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Durable collection of events backed by one SQLite connection.
pub struct EventStore {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl EventStore {
    /// Opens the configured database file, creating and initializing it when
    /// needed. Existing rows are kept untouched.
    pub fn open(config: &StoreConfig) -> RepoResult<Self> {
        let conn = open_db(config.db_path())?;
        Self::from_connection(conn, Some(config.db_path().to_path_buf()))
    }

    /// Opens a throwaway in-memory store.
    pub fn open_in_memory() -> RepoResult<Self> {
        let conn = open_db_in_memory()?;
        Self::from_connection(conn, None)
    }

    fn from_connection(conn: Connection, db_path: Option<PathBuf>) -> RepoResult<Self> {
        SqliteEventRepository::try_new(&conn)?;
        Ok(Self { conn, db_path })
    }

    /// Re-runs schema initialization. A no-op on an initialized store.
    pub fn initialize(&mut self) -> RepoResult<()> {
        apply_migrations(&mut self.conn)?;
        SqliteEventRepository::try_new(&self.conn)?;
        Ok(())
    }

    /// Database file backing this store; `None` for in-memory stores.
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Appends one event and returns its assigned id.
    ///
    /// Fields are stored as supplied; empty strings are not rejected here.
    pub fn insert(&self, name: &str, date: &str, location: &str) -> RepoResult<EventId> {
        self.create_event(&NewEvent::new(name, date, location))
    }

    /// Returns a snapshot of every stored event by ascending id.
    pub fn list(&self) -> RepoResult<Vec<Event>> {
        self.list_events()
    }

    /// Looks up one event.
    pub fn get(&self, id: EventId) -> RepoResult<Option<Event>> {
        self.get_event(id)
    }

    /// Removes the event with `id`. Absent ids are a successful no-op and
    /// return `false`.
    pub fn delete(&self, id: EventId) -> RepoResult<bool> {
        self.delete_event(id)
    }

    /// Closes the underlying connection, reporting close failures.
    pub fn close(self) -> RepoResult<()> {
        self.conn.close().map_err(|(_conn, err)| {
            error!("event=store_close module=store status=error error={}", err);
            DbError::Sqlite(err).into()
        })
    }

    fn repo(&self) -> SqliteEventRepository<'_> {
        SqliteEventRepository::from_verified(&self.conn)
    }
}

impl EventRepository for EventStore {
    fn create_event(&self, event: &NewEvent) -> RepoResult<EventId> {
        match self.repo().create_event(event) {
            Ok(id) => {
                info!("event=event_insert module=store status=ok event_id={id}");
                Ok(id)
            }
            Err(err) => {
                error!("event=event_insert module=store status=error error={err}");
                Err(err)
            }
        }
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>> {
        self.repo().get_event(id)
    }

    fn list_events(&self) -> RepoResult<Vec<Event>> {
        self.repo().list_events()
    }

    fn delete_event(&self, id: EventId) -> RepoResult<bool> {
        match self.repo().delete_event(id) {
            Ok(removed) => {
                info!(
                    "event=event_delete module=store status=ok event_id={} removed={}",
                    id, removed
                );
                Ok(removed)
            }
            Err(err) => {
                error!(
                    "event=event_delete module=store status=error event_id={} error={}",
                    id, err
                );
                Err(err)
            }
        }
    }
}
