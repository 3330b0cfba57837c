use asanhai_core::{parse_deadline, HistoryEvent, HistoryEventKind, Task, TaskValidationError};
use chrono::{DateTime, NaiveDate};
use uuid::Uuid;

#[test]
fn task_new_sets_defaults() {
    let created = DateTime::parse_from_rfc3339("2025-08-13T09:30:00+05:00").unwrap();
    let task = Task::new("Pay rent", "", parse_deadline("2025-08-13").unwrap(), created);

    assert!(!task.id.is_nil());
    assert_eq!(task.title, "Pay rent");
    assert_eq!(task.description, "");
    assert!(!task.completed);
    assert_eq!(task.created_at, created);
    assert_eq!(task.validate(), Ok(()));
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let created = DateTime::parse_from_rfc3339("2025-08-13T09:30:00+05:00").unwrap();
    let deadline = parse_deadline("2025-08-15").unwrap();
    let mut task = Task::new("Pay rent", "landlord", deadline, created);
    task.id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    task.completed = true;

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], "11111111-2222-4333-8444-555555555555");
    assert_eq!(json["title"], "Pay rent");
    assert_eq!(json["description"], "landlord");
    assert_eq!(json["deadline"], "2025-08-15");
    assert_eq!(json["completed"], true);
    assert_eq!(json["createdAt"], "2025-08-13T09:30:00+05:00");

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn task_deserialization_defaults_optional_fields() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "Call mom",
        "deadline": "2025-08-16",
        "createdAt": "2025-08-13T09:30:00Z"
    });

    let task: Task = serde_json::from_value(value).unwrap();
    assert_eq!(task.description, "");
    assert!(!task.completed);
}

#[test]
fn validate_rejects_nil_id_and_blank_title() {
    let created = DateTime::parse_from_rfc3339("2025-08-13T09:30:00Z").unwrap();
    let deadline = NaiveDate::from_ymd_opt(2025, 8, 13).unwrap();

    let mut task = Task::new("x", "", deadline, created);
    task.id = Uuid::nil();
    assert_eq!(task.validate(), Err(TaskValidationError::NilId));

    let mut task = Task::new("x", "", deadline, created);
    task.title = "  ".to_string();
    assert_eq!(task.validate(), Err(TaskValidationError::EmptyTitle));
}

#[test]
fn history_events_serialize_as_tagged_records() {
    let at = DateTime::parse_from_rfc3339("2025-08-13T10:00:00+02:00").unwrap();
    let moved = HistoryEvent::rescheduled(
        "Dentist",
        NaiveDate::from_ymd_opt(2025, 8, 10).unwrap(),
        NaiveDate::from_ymd_opt(2025, 8, 20).unwrap(),
        at,
    );

    let json = serde_json::to_value(&moved).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "type": "rescheduled",
            "title": "Dentist",
            "fromDeadline": "2025-08-10",
            "toDeadline": "2025-08-20",
            "occurredAt": "2025-08-13T10:00:00+02:00"
        })
    );
    assert_eq!(moved.kind(), HistoryEventKind::Rescheduled);

    let done: HistoryEvent = serde_json::from_value(serde_json::json!({
        "type": "completed",
        "title": "Pay rent",
        "occurredAt": "2025-08-13T10:00:00+02:00"
    }))
    .unwrap();
    assert_eq!(done, HistoryEvent::completed("Pay rent", at));
}

#[test]
fn event_kind_names_match_serialized_tags() {
    let at = DateTime::parse_from_rfc3339("2025-08-13T10:00:00+02:00").unwrap();
    let date = NaiveDate::from_ymd_opt(2025, 8, 10).unwrap();
    let events = [
        HistoryEvent::completed("Pay rent", at),
        HistoryEvent::rescheduled("Dentist", date, date, at),
    ];

    for event in events {
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], event.kind().as_str());
        assert_eq!(HistoryEventKind::parse(event.kind().as_str()), Some(event.kind()));
    }
    assert_eq!(HistoryEventKind::parse("date_change"), None);
}
