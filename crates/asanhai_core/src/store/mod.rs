//! In-memory owners of the task collection and the history log.
//!
//! # Responsibility
//! - `TaskStore` exclusively owns tasks; `EventLog` exclusively owns events.
//! - Report the two recoverable error kinds (`Validation`, `NotFound`).
//!
//! # Invariants
//! - A failed mutation leaves both structures unchanged.
//! - Events are only ever appended.

use crate::model::task::{TaskId, TaskValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod event_log;
pub mod state;
pub mod task_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Recoverable error for task mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Validation(TaskValidationError),
    NotFound(TaskId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}
