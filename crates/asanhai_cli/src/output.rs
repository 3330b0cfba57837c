//! Plain-text rendering for list, week and report views.

use asanhai_core::{HistoryEvent, Task, TaskFilter, WeekWindow, WeeklyReport};
use std::fmt::Write;

const DATE_FORMAT: &str = "%d/%m/%Y";
const DATE_TIME_FORMAT: &str = "%d/%m/%Y %H:%M";

pub fn render_tasks(filter: TaskFilter, tasks: &[&Task]) -> String {
    let mut out = format!("{} ({})", filter.label(), tasks.len());
    for task in tasks {
        let mark = if task.completed { "x" } else { " " };
        let _ = write!(
            out,
            "\n[{mark}] {}  {}  {}",
            task.id,
            task.deadline.format(DATE_FORMAT),
            task.title
        );
        if !task.description.is_empty() {
            let _ = write!(out, "\n    {}", task.description);
        }
    }
    out
}

pub fn render_week(window: &WeekWindow, tasks: &[Task]) -> String {
    let mut out = window.label();
    for (day, count) in window.task_counts(tasks) {
        let summary = match count {
            0 => "No tasks".to_string(),
            1 => "1 task".to_string(),
            n => format!("{n} tasks"),
        };
        let _ = write!(out, "\n{}  {summary}", day.format("%a %m/%d"));
    }
    out
}

pub fn render_report(report: &WeeklyReport) -> String {
    let mut out = String::from("This Week's Report");

    out.push_str("\nCompleted tasks:");
    if report.completed_this_week.is_empty() {
        out.push_str(" None");
    }
    for event in &report.completed_this_week {
        let _ = write!(
            out,
            "\n  {} on {}",
            event.title(),
            event.occurred_at().format(DATE_TIME_FORMAT)
        );
    }

    out.push_str("\nDate changes:");
    if report.reschedules_this_week.is_empty() {
        out.push_str(" None");
    }
    for event in &report.reschedules_this_week {
        if let HistoryEvent::Rescheduled {
            title,
            from_deadline,
            to_deadline,
            occurred_at,
        } = event
        {
            let _ = write!(
                out,
                "\n  {title} changed from {} to {} ({})",
                from_deadline.format(DATE_FORMAT),
                to_deadline.format(DATE_FORMAT),
                occurred_at.format(DATE_TIME_FORMAT)
            );
        }
    }

    let _ = write!(out, "\nPending tasks: {}", join_or_none(&report.pending_titles));
    let _ = write!(out, "\nOverdue tasks: {}", join_or_none(&report.overdue_titles));
    out
}

fn join_or_none(titles: &[String]) -> String {
    if titles.is_empty() {
        "None".to_string()
    } else {
        titles.join(", ")
    }
}
