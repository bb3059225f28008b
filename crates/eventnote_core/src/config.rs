//! Storage location configuration.
//!
//! # Responsibility
//! - Resolve the single database file the store owns.
//!
//! # Invariants
//! - The location is fixed once a store is opened; nothing is read from the
//!   process environment.

use std::path::{Path, PathBuf};

/// File name used when the caller only supplies a directory.
pub const DEFAULT_DB_FILE_NAME: &str = "events.db";

/// Where the event store keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    db_path: PathBuf,
}

impl StoreConfig {
    /// Uses `db_path` as the database file.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Uses `DEFAULT_DB_FILE_NAME` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_DB_FILE_NAME))
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}
