//! Monday-to-Sunday week windows for calendar navigation.

use crate::clock::Timestamp;
use crate::model::task::Task;
use crate::query::classifier::calendar_day;
use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

/// Seven consecutive days starting on a Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekWindow {
    pub start_date: NaiveDate,
    pub days: [NaiveDate; 7],
}

impl WeekWindow {
    /// Builds the window starting at `monday`, or `None` past the end of
    /// the representable calendar.
    fn starting_at(monday: NaiveDate) -> Option<Self> {
        let mut days = [monday; 7];
        for (offset, day) in (1u64..).zip(days.iter_mut().skip(1)) {
            *day = monday.checked_add_days(Days::new(offset))?;
        }
        Some(Self {
            start_date: monday,
            days,
        })
    }

    /// The Sunday closing this window.
    pub fn end_date(&self) -> NaiveDate {
        self.days[6]
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date()
    }

    /// Header text such as `Aug 11 – Aug 17, 2025`.
    pub fn label(&self) -> String {
        format!(
            "{} – {}",
            self.start_date.format("%b %d"),
            self.end_date().format("%b %d, %Y")
        )
    }

    /// Number of tasks due on each day, completed ones included.
    pub fn task_counts(&self, tasks: &[Task]) -> [(NaiveDate, usize); 7] {
        self.days.map(|day| {
            let count = tasks.iter().filter(|task| task.deadline == day).count();
            (day, count)
        })
    }
}

/// Window for the week containing `now`, shifted by `offset_weeks`.
///
/// Negative offsets move into the past. Returns `None` only when the shifted
/// week falls outside chrono's supported date range.
pub fn week_window(now: Timestamp, offset_weeks: i64) -> Option<WeekWindow> {
    let monday = monday_of(calendar_day(now))?;
    let shift = offset_weeks.checked_mul(7)?;
    let start = if shift >= 0 {
        monday.checked_add_days(Days::new(shift.unsigned_abs()))?
    } else {
        monday.checked_sub_days(Days::new(shift.unsigned_abs()))?
    };
    WeekWindow::starting_at(start)
}

/// Monday of the week containing `day`.
pub fn monday_of(day: NaiveDate) -> Option<NaiveDate> {
    let since_monday = u64::from(day.weekday().num_days_from_monday());
    day.checked_sub_days(Days::new(since_monday))
}

#[cfg(test)]
mod tests {
    use super::{monday_of, WeekWindow};
    use chrono::NaiveDate;

    #[test]
    fn monday_of_is_identity_on_mondays() {
        let monday = NaiveDate::from_ymd_opt(2025, 8, 11).unwrap();
        assert_eq!(monday_of(monday), Some(monday));
    }

    #[test]
    fn window_near_calendar_end_is_rejected() {
        assert_eq!(WeekWindow::starting_at(NaiveDate::MAX), None);
    }

    #[test]
    fn label_spans_start_and_end() {
        let window =
            WeekWindow::starting_at(NaiveDate::from_ymd_opt(2025, 8, 11).unwrap()).unwrap();
        assert_eq!(window.label(), "Aug 11 – Aug 17, 2025");
    }
}
