//! SQLite-backed snapshot repository.
//!
//! # Responsibility
//! - Persist tasks (replaced wholesale, in list order) and history events
//!   (append-only, in log order) inside one transaction per save.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `tasks.position` mirrors `TaskStore` insertion order.
//! - `history_events.seq` is the 1-based log position; rows are never
//!   updated or deleted (enforced by triggers).

use crate::clock::Timestamp;
use crate::db::migrations::{latest_version, schema_version};
use crate::model::event::{HistoryEvent, HistoryEventKind};
use crate::model::task::{format_deadline, Task, DEADLINE_FORMAT};
use crate::repo::{validate_tasks, RepoError, RepoResult, Snapshot, SnapshotRepository};
use chrono::{DateTime, NaiveDate};
use log::{debug, info};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    description,
    deadline,
    completed,
    created_at
FROM tasks
ORDER BY position ASC;";

const EVENT_SELECT_SQL: &str = "SELECT
    seq,
    kind,
    title,
    from_deadline,
    to_deadline,
    occurred_at
FROM history_events
ORDER BY seq ASC;";

/// Snapshot repository over a migrated SQLite connection.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Wraps a connection opened through `db::open_db*`.
    ///
    /// # Errors
    /// - `InvalidData` when the schema is not at the latest version.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let version = schema_version(conn)?;
        if version != latest_version() {
            return Err(RepoError::InvalidData(format!(
                "schema version {version} does not match expected {}",
                latest_version()
            )));
        }
        Ok(Self { conn })
    }

    /// Number of history rows currently stored.
    pub fn stored_event_count(&self) -> RepoResult<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM history_events;", [], |row| row.get(0))?;
        usize::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative history count {count}")))
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn load_snapshot(&self) -> RepoResult<Snapshot> {
        let mut tasks = Vec::new();
        let mut stmt = self.conn.prepare(TASK_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        let events = load_events(self.conn)?;

        debug!(
            "event=snapshot_load module=repo status=ok backend=sqlite tasks={} events={}",
            tasks.len(),
            events.len()
        );
        Ok(Snapshot { tasks, events })
    }

    fn save_snapshot(&self, tasks: &[Task], events: &[HistoryEvent]) -> RepoResult<()> {
        validate_tasks(tasks)?;

        let tx = self.conn.unchecked_transaction()?;
        let stored_events = load_events(&tx)?;
        let stored = stored_events.len();
        if stored > events.len() {
            return Err(RepoError::InvalidData(format!(
                "history is append-only: {stored} events stored, snapshot has {}",
                events.len()
            )));
        }
        if let Some(seq) = first_divergence(&stored_events, events) {
            return Err(RepoError::InvalidData(format!(
                "history is append-only: stored event at seq {seq} differs from snapshot"
            )));
        }

        tx.execute("DELETE FROM tasks;", [])?;
        {
            let mut insert_task = tx.prepare(
                "INSERT INTO tasks (
                    uuid,
                    position,
                    title,
                    description,
                    deadline,
                    completed,
                    created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            )?;
            for (position, task) in tasks.iter().enumerate() {
                insert_task.execute(params![
                    task.id.to_string(),
                    to_i64(position)?,
                    task.title.as_str(),
                    task.description.as_str(),
                    format_deadline(task.deadline),
                    bool_to_int(task.completed),
                    task.created_at.to_rfc3339(),
                ])?;
            }

            let mut insert_event = tx.prepare(
                "INSERT INTO history_events (
                    seq,
                    kind,
                    title,
                    from_deadline,
                    to_deadline,
                    occurred_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            )?;
            for (index, event) in events.iter().enumerate().skip(stored) {
                let (from_deadline, to_deadline) = match event {
                    HistoryEvent::Completed { .. } => (None, None),
                    HistoryEvent::Rescheduled {
                        from_deadline,
                        to_deadline,
                        ..
                    } => (
                        Some(format_deadline(*from_deadline)),
                        Some(format_deadline(*to_deadline)),
                    ),
                };
                insert_event.execute(params![
                    to_i64(index + 1)?,
                    event.kind().as_str(),
                    event.title(),
                    from_deadline,
                    to_deadline,
                    event.occurred_at().to_rfc3339(),
                ])?;
            }
        }
        tx.commit()?;

        info!(
            "event=snapshot_save module=repo status=ok backend=sqlite tasks={} events_appended={}",
            tasks.len(),
            events.len() - stored
        );
        Ok(())
    }
}

fn load_events(conn: &Connection) -> RepoResult<Vec<HistoryEvent>> {
    let mut events = Vec::new();
    let mut stmt = conn.prepare(EVENT_SELECT_SQL)?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        events.push(parse_event_row(row)?);
    }
    Ok(events)
}

/// 1-based `seq` of the first stored event that the snapshot rewrites.
fn first_divergence(stored: &[HistoryEvent], snapshot: &[HistoryEvent]) -> Option<usize> {
    stored
        .iter()
        .zip(snapshot)
        .position(|(stored, current)| stored != current)
        .map(|index| index + 1)
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in tasks.uuid"))
    })?;

    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid completed value `{other}` in tasks.completed"
            )));
        }
    };

    let task = Task {
        id,
        title: row.get("title")?,
        description: row.get("description")?,
        deadline: parse_date(&row.get::<_, String>("deadline")?, "tasks.deadline")?,
        completed,
        created_at: parse_timestamp(&row.get::<_, String>("created_at")?, "tasks.created_at")?,
    };
    task.validate()?;
    Ok(task)
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<HistoryEvent> {
    let seq: i64 = row.get("seq")?;
    let kind_text: String = row.get("kind")?;
    let kind = HistoryEventKind::parse(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid event kind `{kind_text}` in history_events.kind (seq {seq})"
        ))
    })?;
    let title: String = row.get("title")?;
    let occurred_at = parse_timestamp(
        &row.get::<_, String>("occurred_at")?,
        "history_events.occurred_at",
    )?;

    match kind {
        HistoryEventKind::Completed => Ok(HistoryEvent::completed(title, occurred_at)),
        HistoryEventKind::Rescheduled => {
            let from: Option<String> = row.get("from_deadline")?;
            let to: Option<String> = row.get("to_deadline")?;
            let (Some(from), Some(to)) = (from, to) else {
                return Err(RepoError::InvalidData(format!(
                    "rescheduled event at seq {seq} is missing deadlines"
                )));
            };
            Ok(HistoryEvent::rescheduled(
                title,
                parse_date(&from, "history_events.from_deadline")?,
                parse_date(&to, "history_events.to_deadline")?,
                occurred_at,
            ))
        }
    }
}

fn parse_date(value: &str, column: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DEADLINE_FORMAT)
        .map_err(|_| RepoError::InvalidData(format!("invalid date `{value}` in {column}")))
}

fn parse_timestamp(value: &str, column: &str) -> RepoResult<Timestamp> {
    DateTime::parse_from_rfc3339(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid timestamp `{value}` in {column}")))
}

fn to_i64(value: usize) -> RepoResult<i64> {
    i64::try_from(value)
        .map_err(|_| RepoError::InvalidData(format!("position {value} exceeds i64 range")))
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
