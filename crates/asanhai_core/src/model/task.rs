//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record kept by `TaskStore`.
//! - Parse and validate the required `title` and `deadline` inputs.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is non-empty after trimming.
//! - `deadline` is a calendar date with no time-of-day component.

use crate::clock::Timestamp;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Wire/storage format for deadlines.
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d";

static DEADLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid deadline regex"));

/// Validation errors for required task fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyTitle,
    MissingDeadline,
    InvalidDeadline(String),
    NilId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title cannot be empty"),
            Self::MissingDeadline => write!(f, "task deadline is required"),
            Self::InvalidDeadline(value) => {
                write!(f, "invalid deadline `{value}`; expected YYYY-MM-DD")
            }
            Self::NilId => write!(f, "task id cannot be nil"),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task record.
///
/// Field names serialize in camelCase to match the persisted snapshot
/// format (`createdAt`), dates as `YYYY-MM-DD` and instants as RFC 3339.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub completed: bool,
    pub created_at: Timestamp,
}

impl Task {
    /// Creates an open task with a generated stable ID.
    ///
    /// Title and description are trimmed. Callers are expected to have
    /// validated the title; use [`Task::validate`] when in doubt.
    pub fn new(
        title: impl AsRef<str>,
        description: impl AsRef<str>,
        deadline: NaiveDate,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.as_ref().trim().to_string(),
            description: description.as_ref().trim().to_string(),
            deadline,
            completed: false,
            created_at,
        }
    }

    /// Validates invariants for a task accepted into the store.
    ///
    /// # Errors
    /// - `NilId` when `id` is the nil UUID.
    /// - `EmptyTitle` when `title` is blank.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        validate_title(&self.title)?;
        Ok(())
    }
}

/// Returns the trimmed title, or `EmptyTitle` when nothing is left.
pub fn validate_title(title: &str) -> Result<&str, TaskValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    Ok(trimmed)
}

/// Parses a `YYYY-MM-DD` deadline.
///
/// # Errors
/// - `MissingDeadline` when the input is blank.
/// - `InvalidDeadline` when the shape is wrong or the date does not exist.
pub fn parse_deadline(value: &str) -> Result<NaiveDate, TaskValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::MissingDeadline);
    }
    if !DEADLINE_RE.is_match(trimmed) {
        return Err(TaskValidationError::InvalidDeadline(trimmed.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, DEADLINE_FORMAT)
        .map_err(|_| TaskValidationError::InvalidDeadline(trimmed.to_string()))
}

/// Formats a deadline in its canonical `YYYY-MM-DD` form.
pub fn format_deadline(deadline: NaiveDate) -> String {
    deadline.format(DEADLINE_FORMAT).to_string()
}
