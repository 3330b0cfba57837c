//! JSON file snapshot repository.
//!
//! Stores `{ "tasks": [...], "events": [...] }` with camelCase field names,
//! `YYYY-MM-DD` dates and RFC 3339 instants. Used for export and as a
//! lightweight storage sink.
//!
//! # Invariants
//! - A missing file loads as an empty snapshot.
//! - Writes go to a sibling temp file first and are renamed into place.
//! - Previously stored events must be a prefix of the saved events.

use crate::model::event::HistoryEvent;
use crate::model::task::Task;
use crate::repo::{validate_tasks, RepoError, RepoResult, Snapshot, SnapshotRepository};
use log::{debug, info};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Snapshot repository backed by one JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotRepository {
    path: PathBuf,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    tasks: &'a [Task],
    events: &'a [HistoryEvent],
}

impl JsonFileSnapshotRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotRepository for JsonFileSnapshotRepository {
    fn load_snapshot(&self) -> RepoResult<Snapshot> {
        if !self.path.exists() {
            debug!("event=snapshot_load module=repo status=skip backend=json reason=missing_file");
            return Ok(Snapshot::default());
        }

        let raw = std::fs::read_to_string(&self.path)?;
        let snapshot: Snapshot = serde_json::from_str(&raw)?;
        validate_tasks(&snapshot.tasks)?;
        debug!(
            "event=snapshot_load module=repo status=ok backend=json tasks={} events={}",
            snapshot.tasks.len(),
            snapshot.events.len()
        );
        Ok(snapshot)
    }

    fn save_snapshot(&self, tasks: &[Task], events: &[HistoryEvent]) -> RepoResult<()> {
        validate_tasks(tasks)?;

        let stored = self.load_snapshot()?.events;
        if !events.starts_with(&stored) {
            return Err(RepoError::InvalidData(format!(
                "history is append-only: {} stored events are not a prefix of the snapshot",
                stored.len()
            )));
        }

        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(&SnapshotRef { tasks, events })?;
        let temp_path = self.temp_path();
        std::fs::write(&temp_path, body)?;
        std::fs::rename(&temp_path, &self.path)?;

        info!(
            "event=snapshot_save module=repo status=ok backend=json tasks={} events={}",
            tasks.len(),
            events.len()
        );
        Ok(())
    }
}
