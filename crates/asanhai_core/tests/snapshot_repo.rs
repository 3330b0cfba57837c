use asanhai_core::db::{open_db, open_db_in_memory};
use asanhai_core::{
    HistoryEvent, JsonFileSnapshotRepository, RepoError, SnapshotRepository,
    SqliteSnapshotRepository, Task, Timestamp,
};
use chrono::{DateTime, NaiveDate};
use rusqlite::Connection;

fn ts(value: &str) -> Timestamp {
    DateTime::parse_from_rfc3339(value).unwrap()
}

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).unwrap()
}

fn sample_tasks() -> Vec<Task> {
    let mut done = Task::new("Gym", "legs", date(8, 12), ts("2025-08-11T07:00:00+05:00"));
    done.completed = true;
    vec![
        Task::new("Pay rent", "", date(8, 13), ts("2025-08-11T08:00:00+05:00")),
        done,
        Task::new("Dentist", "checkup", date(8, 20), ts("2025-08-11T09:00:00+05:00")),
    ]
}

fn sample_events() -> Vec<HistoryEvent> {
    vec![
        HistoryEvent::completed("Gym", ts("2025-08-12T18:00:00+05:00")),
        HistoryEvent::rescheduled(
            "Dentist",
            date(8, 10),
            date(8, 20),
            ts("2025-08-12T19:15:30.250+05:00"),
        ),
    ]
}

#[test]
fn empty_database_loads_empty_snapshot() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();

    let snapshot = repo.load_snapshot().unwrap();
    assert!(snapshot.tasks.is_empty());
    assert!(snapshot.events.is_empty());
}

#[test]
fn sqlite_save_and_load_preserves_order_and_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("asanhai.sqlite3");
    let tasks = sample_tasks();
    let events = sample_events();

    {
        let conn = open_db(&path).unwrap();
        let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
        repo.save_snapshot(&tasks, &events).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let snapshot = repo.load_snapshot().unwrap();
    assert_eq!(snapshot.tasks, tasks);
    assert_eq!(snapshot.events, events);
}

#[test]
fn sqlite_save_replaces_tasks_and_appends_only_new_events() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let mut tasks = sample_tasks();
    let mut events = sample_events();
    repo.save_snapshot(&tasks, &events[..1]).unwrap();

    tasks.remove(0);
    events.push(HistoryEvent::completed("Dentist", ts("2025-08-13T09:00:00+05:00")));
    repo.save_snapshot(&tasks, &events).unwrap();

    let snapshot = repo.load_snapshot().unwrap();
    assert_eq!(snapshot.tasks, tasks);
    assert_eq!(snapshot.events, events);
    assert_eq!(repo.stored_event_count().unwrap(), 3);
}

#[test]
fn sqlite_rejects_snapshot_that_drops_history() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let events = sample_events();
    repo.save_snapshot(&[], &events).unwrap();

    let err = repo.save_snapshot(&[], &events[..1]).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("append-only")));
    assert_eq!(repo.load_snapshot().unwrap().events, events);
}

#[test]
fn sqlite_rejects_rewritten_history() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let tasks = sample_tasks();
    let stored = vec![HistoryEvent::completed("A", ts("2025-08-12T18:00:00+05:00"))];
    repo.save_snapshot(&tasks, &stored).unwrap();

    let diverging = vec![
        HistoryEvent::completed("B", ts("2025-08-12T18:00:00+05:00")),
        HistoryEvent::completed("C", ts("2025-08-12T19:00:00+05:00")),
    ];
    let err = repo.save_snapshot(&[], &diverging).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("seq 1")));

    let snapshot = repo.load_snapshot().unwrap();
    assert_eq!(snapshot.events, stored);
    assert_eq!(snapshot.tasks, tasks);
}

#[test]
fn sqlite_rejects_invalid_tasks_before_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let mut tasks = sample_tasks();
    tasks[1].title = "   ".to_string();

    let err = repo.save_snapshot(&tasks, &[]).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(repo.load_snapshot().unwrap().tasks.is_empty());
}

#[test]
fn sqlite_load_reports_corrupted_rows() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO tasks (uuid, position, title, description, deadline, completed, created_at)
         VALUES ('not-a-uuid', 0, 'x', '', '2025-08-13', 0, '2025-08-13T10:00:00+00:00');",
        [],
    )
    .unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();

    let err = repo.load_snapshot().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("tasks.uuid")));
}

#[test]
fn try_new_requires_migrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteSnapshotRepository::try_new(&conn).err().unwrap();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn json_missing_file_loads_empty_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileSnapshotRepository::new(dir.path().join("missing.json"));

    let snapshot = repo.load_snapshot().unwrap();
    assert!(snapshot.tasks.is_empty());
    assert!(snapshot.events.is_empty());
}

#[test]
fn json_save_writes_documented_shape_and_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("snapshot.json");
    let repo = JsonFileSnapshotRepository::new(&path);
    let tasks = sample_tasks();
    let events = sample_events();

    repo.save_snapshot(&tasks, &events).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["tasks"][0]["title"], "Pay rent");
    assert_eq!(raw["tasks"][0]["deadline"], "2025-08-13");
    assert_eq!(raw["events"][1]["type"], "rescheduled");
    assert_eq!(raw["events"][1]["fromDeadline"], "2025-08-10");

    let snapshot = repo.load_snapshot().unwrap();
    assert_eq!(snapshot.tasks, tasks);
    assert_eq!(snapshot.events, events);
}

#[test]
fn json_rejects_rewritten_history() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileSnapshotRepository::new(dir.path().join("snapshot.json"));
    let events = sample_events();
    repo.save_snapshot(&[], &events).unwrap();

    let rewritten = vec![events[1].clone(), events[0].clone()];
    let err = repo.save_snapshot(&[], &rewritten).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn json_load_rejects_malformed_documents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    std::fs::write(&path, r#"{"tasks": [{"title": "no id"}]}"#).unwrap();

    let err = JsonFileSnapshotRepository::new(&path).load_snapshot().unwrap_err();
    assert!(matches!(err, RepoError::Json(_)));
}
