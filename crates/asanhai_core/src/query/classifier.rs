//! Time-bucket classification of tasks.
//!
//! # Invariants
//! - Comparisons use `calendar_day(now)`; time of day is ignored.
//! - `pending` and `overdue` exclude completed tasks; `upcoming` does not.
//! - Buckets are not mutually exclusive across filters.

use crate::clock::Timestamp;
use crate::model::task::Task;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Named filters offered to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskFilter {
    All,
    Today,
    Tomorrow,
    DayAfterTomorrow,
    Pending,
    Overdue,
    Upcoming,
}

impl TaskFilter {
    pub const VARIANTS: [TaskFilter; 7] = [
        Self::All,
        Self::Today,
        Self::Tomorrow,
        Self::DayAfterTomorrow,
        Self::Pending,
        Self::Overdue,
        Self::Upcoming,
    ];

    /// Human-readable label for filter bars.
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Today => "Today",
            Self::Tomorrow => "Tomorrow",
            Self::DayAfterTomorrow => "Day After Tomorrow",
            Self::Pending => "Pending",
            Self::Overdue => "Overdue",
            Self::Upcoming => "Upcoming",
        }
    }

    /// Whether `task` belongs to this filter at `now`.
    pub fn matches(self, task: &Task, now: Timestamp) -> bool {
        let today = calendar_day(now);
        match self {
            Self::All => true,
            Self::Today => is_today(task, today),
            Self::Tomorrow => is_tomorrow(task, today),
            Self::DayAfterTomorrow => is_day_after_tomorrow(task, today),
            Self::Pending => is_pending(task, today),
            Self::Overdue => is_overdue(task, today),
            Self::Upcoming => is_upcoming(task, today),
        }
    }
}

/// Error for an unknown filter name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilter(pub String);

impl Display for UnknownFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown filter `{}`; expected all|today|tomorrow|day-after-tomorrow|pending|overdue|upcoming",
            self.0
        )
    }
}

impl std::error::Error for UnknownFilter {}

impl FromStr for TaskFilter {
    type Err = UnknownFilter;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "tomorrow" => Ok(Self::Tomorrow),
            "day-after-tomorrow" | "day_after_tomorrow" | "dayaftertomorrow" => {
                Ok(Self::DayAfterTomorrow)
            }
            "pending" => Ok(Self::Pending),
            "overdue" => Ok(Self::Overdue),
            "upcoming" => Ok(Self::Upcoming),
            other => Err(UnknownFilter(other.to_string())),
        }
    }
}

/// Every bucket predicate for one task, evaluated at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Buckets {
    pub today: bool,
    pub tomorrow: bool,
    pub day_after_tomorrow: bool,
    pub pending: bool,
    pub overdue: bool,
    pub upcoming: bool,
}

/// Resolves "now" to its calendar day in its own offset.
pub fn calendar_day(now: Timestamp) -> NaiveDate {
    now.date_naive()
}

pub fn classify(task: &Task, now: Timestamp) -> Buckets {
    let today = calendar_day(now);
    Buckets {
        today: is_today(task, today),
        tomorrow: is_tomorrow(task, today),
        day_after_tomorrow: is_day_after_tomorrow(task, today),
        pending: is_pending(task, today),
        overdue: is_overdue(task, today),
        upcoming: is_upcoming(task, today),
    }
}

/// Tasks matching `filter`, in their original order.
pub fn filter_tasks(tasks: &[Task], filter: TaskFilter, now: Timestamp) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| filter.matches(task, now))
        .collect()
}

pub fn is_today(task: &Task, today: NaiveDate) -> bool {
    task.deadline == today
}

pub fn is_tomorrow(task: &Task, today: NaiveDate) -> bool {
    days_after(today, 1) == Some(task.deadline)
}

pub fn is_day_after_tomorrow(task: &Task, today: NaiveDate) -> bool {
    days_after(today, 2) == Some(task.deadline)
}

/// Open and due today or earlier.
pub fn is_pending(task: &Task, today: NaiveDate) -> bool {
    !task.completed && task.deadline <= today
}

/// Open and due strictly before today.
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    !task.completed && task.deadline < today
}

/// Due after today, completed or not.
pub fn is_upcoming(task: &Task, today: NaiveDate) -> bool {
    task.deadline > today
}

fn days_after(day: NaiveDate, count: u64) -> Option<NaiveDate> {
    day.checked_add_days(Days::new(count))
}
