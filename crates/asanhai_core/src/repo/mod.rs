//! Snapshot persistence contracts and implementations.
//!
//! # Responsibility
//! - Define the storage contract the session persists through.
//! - Isolate SQLite and JSON file details from service orchestration.
//!
//! # Invariants
//! - Loaded rows are re-validated; invalid persisted data is an error.
//! - Stored history is append-only: a snapshot may only add events.

use crate::db::DbError;
use crate::model::event::HistoryEvent;
use crate::model::task::{Task, TaskValidationError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod json_snapshot;
pub mod snapshot_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for snapshot load/save operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Io(std::io::Error),
    Json(serde_json::Error),
    Validation(TaskValidationError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "snapshot io failed: {err}"),
            Self::Json(err) => write!(f, "snapshot json is invalid: {err}"),
            Self::Validation(err) => write!(f, "invalid persisted task: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted snapshot: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::InvalidData(_) => None,
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

impl From<std::io::Error> for RepoError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Full persisted state: tasks and history, both in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub events: Vec<HistoryEvent>,
}

/// Storage sink for the core's task and history snapshots.
pub trait SnapshotRepository {
    /// Loads the stored snapshot, or an empty one when nothing is stored.
    fn load_snapshot(&self) -> RepoResult<Snapshot>;

    /// Stores the full current state.
    ///
    /// # Errors
    /// - `InvalidData` when `events` is shorter than the stored history.
    fn save_snapshot(&self, tasks: &[Task], events: &[HistoryEvent]) -> RepoResult<()>;
}

impl<R: SnapshotRepository + ?Sized> SnapshotRepository for &R {
    fn load_snapshot(&self) -> RepoResult<Snapshot> {
        (**self).load_snapshot()
    }

    fn save_snapshot(&self, tasks: &[Task], events: &[HistoryEvent]) -> RepoResult<()> {
        (**self).save_snapshot(tasks, events)
    }
}

fn validate_tasks(tasks: &[Task]) -> RepoResult<()> {
    for task in tasks {
        task.validate()?;
    }
    Ok(())
}
