use asanhai_core::{classify, filter_tasks, Task, TaskFilter, Timestamp};
use chrono::{Days, FixedOffset, NaiveDate, TimeZone};

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Timestamp {
    FixedOffset::east_opt(5 * 3600)
        .unwrap()
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn task(title: &str, deadline: NaiveDate, completed: bool) -> Task {
    let mut task = Task::new(title, "", deadline, at(2025, 8, 1, 9, 0));
    task.completed = completed;
    task
}

#[test]
fn deadline_today_is_today_only() {
    let now = at(2025, 8, 13, 23, 59);
    let buckets = classify(&task("a", date(2025, 8, 13), false), now);

    assert!(buckets.today);
    assert!(!buckets.tomorrow);
    assert!(!buckets.day_after_tomorrow);
    assert!(!buckets.upcoming);
}

#[test]
fn tomorrow_and_day_after_use_calendar_days() {
    let now = at(2025, 8, 31, 0, 1);

    let tomorrow = classify(&task("a", date(2025, 9, 1), false), now);
    assert!(tomorrow.tomorrow);
    assert!(!tomorrow.day_after_tomorrow);
    assert!(tomorrow.upcoming);

    let after = classify(&task("b", date(2025, 9, 2), true), now);
    assert!(after.day_after_tomorrow);
    assert!(!after.tomorrow);
    assert!(after.upcoming, "completed future tasks stay upcoming");
}

#[test]
fn pending_and_overdue_split_on_today() {
    let now = at(2025, 8, 13, 8, 0);

    let past = classify(&task("past", date(2025, 8, 12), false), now);
    assert!(past.pending);
    assert!(past.overdue);

    let today = classify(&task("today", date(2025, 8, 13), false), now);
    assert!(today.pending);
    assert!(!today.overdue);

    let done = classify(&task("done", date(2025, 8, 1), true), now);
    assert!(!done.pending);
    assert!(!done.overdue);
}

#[test]
fn upcoming_ignores_completion_state() {
    let now = at(2025, 8, 13, 12, 0);
    for offset in 1..40 {
        let deadline = date(2025, 8, 13).checked_add_days(Days::new(offset)).unwrap();
        assert!(classify(&task("open", deadline, false), now).upcoming);
        assert!(classify(&task("done", deadline, true), now).upcoming);
    }
}

#[test]
fn time_of_day_does_not_shift_buckets() {
    let early = at(2025, 8, 13, 0, 0);
    let late = at(2025, 8, 13, 23, 59);
    let item = task("a", date(2025, 8, 12), false);

    assert_eq!(classify(&item, early), classify(&item, late));
}

#[test]
fn scenario_pay_rent_due_today() {
    let now = at(2025, 8, 13, 10, 0);
    let rent = Task::new("Pay rent", "", now.date_naive(), now);

    let buckets = classify(&rent, now);
    assert!(buckets.pending);
    assert!(!buckets.overdue);
    assert!(buckets.today);
}

#[test]
fn scenario_old_bill_five_days_late() {
    let now = at(2025, 8, 13, 10, 0);
    let deadline = now.date_naive().checked_sub_days(Days::new(5)).unwrap();
    let bill = Task::new("Old bill", "", deadline, now);

    let buckets = classify(&bill, now);
    assert!(buckets.overdue);
    assert!(buckets.pending);
}

#[test]
fn filter_tasks_keeps_insertion_order_and_overlapping_buckets() {
    let now = at(2025, 8, 13, 10, 0);
    let tasks = vec![
        task("late", date(2025, 8, 10), false),
        task("today", date(2025, 8, 13), false),
        task("later", date(2025, 8, 20), true),
        task("late done", date(2025, 8, 11), true),
        task("tomorrow", date(2025, 8, 14), false),
    ];
    let titles = |filter| {
        filter_tasks(&tasks, filter, now)
            .into_iter()
            .map(|task| task.title.as_str())
            .collect::<Vec<_>>()
    };

    assert_eq!(titles(TaskFilter::All).len(), 5);
    assert_eq!(titles(TaskFilter::Today), vec!["today"]);
    assert_eq!(titles(TaskFilter::Tomorrow), vec!["tomorrow"]);
    assert_eq!(titles(TaskFilter::Pending), vec!["late", "today"]);
    assert_eq!(titles(TaskFilter::Overdue), vec!["late"]);
    assert_eq!(titles(TaskFilter::Upcoming), vec!["later", "tomorrow"]);
    assert!(titles(TaskFilter::DayAfterTomorrow).is_empty());
}
