//! Weekly activity report.
//!
//! # Invariants
//! - Event lists keep `EventLog` insertion order and are not deduplicated.
//! - Event week filtering uses the ISO week (Monday to Sunday) of `now`.
//! - Pending/overdue titles describe state as of `now`, not per week.

use crate::clock::Timestamp;
use crate::model::event::HistoryEvent;
use crate::model::task::Task;
use crate::query::classifier::{calendar_day, is_overdue, is_pending};
use chrono::Datelike;
use serde::Serialize;

/// Derived weekly summary; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
    pub completed_this_week: Vec<HistoryEvent>,
    pub reschedules_this_week: Vec<HistoryEvent>,
    pub pending_titles: Vec<String>,
    pub overdue_titles: Vec<String>,
}

/// Aggregates the report for the week containing `now`.
pub fn build_weekly_report(
    events: &[HistoryEvent],
    tasks: &[Task],
    now: Timestamp,
) -> WeeklyReport {
    let today = calendar_day(now);
    let mut report = WeeklyReport::default();

    for event in events {
        if !occurred_in_week_of(event, now) {
            continue;
        }
        match event {
            HistoryEvent::Completed { .. } => report.completed_this_week.push(event.clone()),
            HistoryEvent::Rescheduled { .. } => report.reschedules_this_week.push(event.clone()),
        }
    }

    for task in tasks {
        if is_pending(task, today) {
            report.pending_titles.push(task.title.clone());
        }
        if is_overdue(task, today) {
            report.overdue_titles.push(task.title.clone());
        }
    }

    report
}

/// Whether `event` happened in the same ISO week as `now`, judged in
/// `now`'s offset.
pub fn occurred_in_week_of(event: &HistoryEvent, now: Timestamp) -> bool {
    let local = event.occurred_at().with_timezone(now.offset());
    local.date_naive().iso_week() == calendar_day(now).iso_week()
}
