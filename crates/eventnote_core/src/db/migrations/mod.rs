//! Schema registry and executor.
//!
//! # Responsibility
//! - Register the schema steps in strictly increasing order.
//! - Apply pending steps atomically on open.
//! - Bring a pre-versioned `events` table under `AUTOINCREMENT` id
//!   assignment while keeping its rows and ids.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied version is mirrored to `PRAGMA user_version`.
//! - After a successful upgrade, `events.id` is declared `AUTOINCREMENT`, so a
//!   deleted id is never handed out again.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{Connection, OptionalExtension};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// Copies a plain `INTEGER PRIMARY KEY` table into an `AUTOINCREMENT` one.
///
/// Inserting explicit ids seeds `sqlite_sequence` with `MAX(id)`.
const REBUILD_EVENTS_SQL: &str = "
CREATE TABLE events_rebuild (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    date TEXT NOT NULL,
    location TEXT NOT NULL
);
INSERT INTO events_rebuild (id, name, date, location)
    SELECT id, name, date, location FROM events ORDER BY id;
DROP TABLE events;
ALTER TABLE events_rebuild RENAME TO events;
";

/// Returns the latest schema version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending schema steps on the provided connection.
///
/// Returns without touching the database when it is already current.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }

    let rebuilt = events_table_uses_autoincrement(&tx)? == Some(false);
    if rebuilt {
        tx.execute_batch(REBUILD_EVENTS_SQL)?;
    }
    tx.commit()?;

    info!(
        "event=schema_upgrade module=db status=ok from_version={} to_version={} rebuilt_events={}",
        current_version, latest, rebuilt
    );
    Ok(())
}

pub(crate) fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

/// `None` when there is no `events` table.
pub(crate) fn events_table_uses_autoincrement(conn: &Connection) -> DbResult<Option<bool>> {
    let sql: Option<String> = conn
        .query_row(
            "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = 'events';",
            [],
            |row| row.get(0),
        )
        .optional()?;

    Ok(sql.map(|sql| sql.to_ascii_uppercase().contains("AUTOINCREMENT")))
}
