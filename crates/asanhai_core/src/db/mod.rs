//! SQLite home of the tracker's tasks and history.
//!
//! # Responsibility
//! - Hand out connections that are configured and migrated.
//! - Own the schema and its `PRAGMA user_version` history.
//!
//! # Invariants
//! - Snapshot repositories only ever see connections at [`migrations::latest_version`].
//! - A database stamped by a newer binary is refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating the tracker database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The directory meant to hold the database file could not be created.
    CreateDir {
        dir: PathBuf,
        source: std::io::Error,
    },
    /// The file carries a schema this binary does not know how to read.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::CreateDir { dir, source } => {
                write!(f, "cannot create database directory {}: {source}", dir.display())
            }
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "tracker database is at schema {found}; this build reads up to {supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::CreateDir { source, .. } => Some(source),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
