//! History event model.
//!
//! # Responsibility
//! - Define the closed set of domain events appended to `EventLog`.
//!
//! # Invariants
//! - Events are immutable once constructed; there is no setter API.
//! - `occurred_at` is the instant of the mutation, never the deadline.
//! - Events reference tasks by a title snapshot, not by `TaskId`.

use crate::clock::Timestamp;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Discriminant of a [`HistoryEvent`], used by storage mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryEventKind {
    Completed,
    Rescheduled,
}

impl HistoryEventKind {
    /// Stored name; matches the `type` tag of the serialized event.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Rescheduled => "rescheduled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        [Self::Completed, Self::Rescheduled]
            .into_iter()
            .find(|kind| kind.as_str() == value)
    }
}

/// Append-only record of a completion toggle or a deadline change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum HistoryEvent {
    /// Completion was toggled (in either direction).
    Completed {
        title: String,
        occurred_at: Timestamp,
    },
    /// Deadline moved from `from_deadline` to `to_deadline`.
    Rescheduled {
        title: String,
        from_deadline: NaiveDate,
        to_deadline: NaiveDate,
        occurred_at: Timestamp,
    },
}

impl HistoryEvent {
    pub fn completed(title: impl Into<String>, occurred_at: Timestamp) -> Self {
        Self::Completed {
            title: title.into(),
            occurred_at,
        }
    }

    pub fn rescheduled(
        title: impl Into<String>,
        from_deadline: NaiveDate,
        to_deadline: NaiveDate,
        occurred_at: Timestamp,
    ) -> Self {
        Self::Rescheduled {
            title: title.into(),
            from_deadline,
            to_deadline,
            occurred_at,
        }
    }

    pub fn kind(&self) -> HistoryEventKind {
        match self {
            Self::Completed { .. } => HistoryEventKind::Completed,
            Self::Rescheduled { .. } => HistoryEventKind::Rescheduled,
        }
    }

    /// Title snapshot taken when the event was recorded.
    pub fn title(&self) -> &str {
        match self {
            Self::Completed { title, .. } | Self::Rescheduled { title, .. } => title,
        }
    }

    pub fn occurred_at(&self) -> Timestamp {
        match self {
            Self::Completed { occurred_at, .. } | Self::Rescheduled { occurred_at, .. } => {
                *occurred_at
            }
        }
    }
}
