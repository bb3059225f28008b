//! Event repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/get/list/delete over the `events` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Ids come from `AUTOINCREMENT` and are never recycled.
//! - Listing is always ordered by ascending id.
//! - Read paths reject undecodable rows instead of masking them.

use crate::db::migrations::{
    current_user_version, events_table_uses_autoincrement, latest_version,
};
use crate::db::DbError;
use crate::model::event::{Event, EventId, NewEvent};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EVENT_SELECT_SQL: &str = "SELECT id, name, date, location FROM events";
const REQUIRED_EVENT_COLUMNS: &[&str] = &["id", "name", "date", "location"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for event persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Storage medium failure (open, I/O, SQL).
    Db(DbError),
    /// Connection has not been initialized to the expected schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Table ids are plain rowids and could be handed out again.
    MissingAutoincrement(&'static str),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
            Self::MissingAutoincrement(table) => {
                write!(f, "table `{table}` does not declare AUTOINCREMENT ids")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted event data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for event CRUD operations.
pub trait EventRepository {
    /// Appends one event and returns its newly assigned id.
    fn create_event(&self, event: &NewEvent) -> RepoResult<EventId>;
    /// Gets one event by id.
    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>>;
    /// Lists all events by ascending id.
    fn list_events(&self) -> RepoResult<Vec<Event>>;
    /// Deletes one event; returns `false` when the id was absent.
    fn delete_event(&self, id: EventId) -> RepoResult<bool>;
}

/// SQLite-backed event repository.
pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    /// Constructs a repository from an initialized connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `user_version` is not current.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   does not have the `events` shape.
    /// - `MissingAutoincrement` when `events.id` could recycle deleted ids.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Skips schema checks for a connection already verified by `try_new`.
    pub(crate) fn from_verified(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl<R: EventRepository + ?Sized> EventRepository for &R {
    fn create_event(&self, event: &NewEvent) -> RepoResult<EventId> {
        (**self).create_event(event)
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>> {
        (**self).get_event(id)
    }

    fn list_events(&self) -> RepoResult<Vec<Event>> {
        (**self).list_events()
    }

    fn delete_event(&self, id: EventId) -> RepoResult<bool> {
        (**self).delete_event(id)
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn create_event(&self, event: &NewEvent) -> RepoResult<EventId> {
        self.conn.execute(
            "INSERT INTO events (name, date, location) VALUES (?1, ?2, ?3);",
            params![
                event.name.as_str(),
                event.date.as_str(),
                event.location.as_str()
            ],
        )?;

        Ok(EventId::new(self.conn.last_insert_rowid()))
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} WHERE id = ?1;"))?;
        let event = stmt
            .query_row([id.get()], |row| Ok(parse_event_row(row)))
            .optional()?;

        event.transpose()
    }

    fn list_events(&self) -> RepoResult<Vec<Event>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut events = Vec::new();

        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }

        Ok(events)
    }

    fn delete_event(&self, id: EventId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM events WHERE id = ?1;", [id.get()])?;
        Ok(changed > 0)
    }
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<Event> {
    let raw_id: i64 = row.get("id")?;
    if raw_id <= 0 {
        return Err(RepoError::InvalidData(format!(
            "invalid id value `{raw_id}` in events.id"
        )));
    }

    let text_column = |column: &str| -> RepoResult<String> {
        row.get::<_, Option<String>>(column)?
            .ok_or_else(|| RepoError::InvalidData(format!("null value in events.{column}")))
    };

    Ok(Event {
        id: EventId::new(raw_id),
        name: text_column("name")?,
        date: text_column("date")?,
        location: text_column("location")?,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let Some(uses_autoincrement) = events_table_uses_autoincrement(conn)? else {
        return Err(RepoError::MissingRequiredTable("events"));
    };

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('events');")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    for &column in REQUIRED_EVENT_COLUMNS {
        if !columns.iter().any(|name| name.as_str() == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: "events",
                column,
            });
        }
    }

    if !uses_autoincrement {
        return Err(RepoError::MissingAutoincrement("events"));
    }

    Ok(())
}
