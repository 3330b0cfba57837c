//! Owned application state: the task store and the history log together.

use crate::model::event::HistoryEvent;
use crate::model::task::Task;
use crate::store::event_log::EventLog;
use crate::store::task_store::TaskStore;

/// Process-resident state held by one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub tasks: TaskStore,
    pub events: EventLog,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds state from the two persisted snapshots.
    pub fn from_snapshot(tasks: Vec<Task>, events: Vec<HistoryEvent>) -> Self {
        Self {
            tasks: TaskStore::from_tasks(tasks),
            events: EventLog::from_events(events),
        }
    }
}
