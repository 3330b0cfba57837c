//! Tracker session: the single owner of application state.
//!
//! # Responsibility
//! - Hold `AppState`, the clock and the snapshot repository together.
//! - Stamp every mutation with the clock's "now" and persist afterwards.
//! - Answer filter, week and report queries from current state.
//!
//! # Invariants
//! - Failed mutations are neither applied nor persisted.
//! - Persistence failures are logged and never roll back in-memory state.
//! - Queries recompute from scratch on every call.

use crate::clock::{Clock, Timestamp};
use crate::model::event::HistoryEvent;
use crate::model::task::{Task, TaskId};
use crate::query::classifier::{filter_tasks, TaskFilter};
use crate::query::report::{build_weekly_report, WeeklyReport};
use crate::query::week::{week_window, WeekWindow};
use crate::repo::{RepoResult, SnapshotRepository};
use crate::store::state::AppState;
use crate::store::StoreResult;
use log::{error, info};

/// Single-writer session over tasks and history.
pub struct TrackerService<R: SnapshotRepository, C: Clock> {
    state: AppState,
    repo: R,
    clock: C,
}

impl<R: SnapshotRepository, C: Clock> TrackerService<R, C> {
    /// Loads the stored snapshot (empty when none exists) and starts a
    /// session over it.
    ///
    /// # Errors
    /// - Returns repository errors when stored data cannot be read or is
    ///   invalid.
    pub fn open(repo: R, clock: C) -> RepoResult<Self> {
        let snapshot = repo.load_snapshot()?;
        info!(
            "event=session_open module=service status=ok tasks={} events={}",
            snapshot.tasks.len(),
            snapshot.events.len()
        );
        Ok(Self {
            state: AppState::from_snapshot(snapshot.tasks, snapshot.events),
            repo,
            clock,
        })
    }

    /// Starts a session over already-built state without loading.
    pub fn with_state(state: AppState, repo: R, clock: C) -> Self {
        Self { state, repo, clock }
    }

    /// Adds one task from form input.
    pub fn add_task(
        &mut self,
        title: &str,
        description: &str,
        deadline: &str,
    ) -> StoreResult<TaskId> {
        let now = self.clock.now();
        let id = self.state.tasks.add(title, description, deadline, now)?;
        self.persist_after("add_task");
        Ok(id)
    }

    /// Adds tasks from pasted text, one per line. Returns the count added.
    pub fn add_bulk(&mut self, input: &str) -> usize {
        let now = self.clock.now();
        let added = self.state.tasks.add_bulk(input.lines(), now);
        if added > 0 {
            self.persist_after("add_bulk");
        }
        added
    }

    /// Flips completion, logging a `Completed` event. Returns the previous
    /// state.
    pub fn toggle_complete(&mut self, id: TaskId) -> StoreResult<bool> {
        let now = self.clock.now();
        let previous = self
            .state
            .tasks
            .toggle_complete(id, &mut self.state.events, now)?;
        self.persist_after("toggle_complete");
        Ok(previous)
    }

    /// Moves a task to `new_deadline`, logging a `Rescheduled` event.
    pub fn reschedule(&mut self, id: TaskId, new_deadline: &str) -> StoreResult<()> {
        let now = self.clock.now();
        self.state
            .tasks
            .reschedule(id, new_deadline, &mut self.state.events, now)?;
        self.persist_after("reschedule");
        Ok(())
    }

    /// Deletes a task if present. Returns whether anything was removed.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let removed = self.state.tasks.remove(id);
        if removed {
            self.persist_after("remove");
        }
        removed
    }

    pub fn tasks(&self) -> &[Task] {
        self.state.tasks.list()
    }

    pub fn events(&self) -> &[HistoryEvent] {
        self.state.events.all()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Tasks in the named bucket at the clock's current instant.
    pub fn filtered(&self, filter: TaskFilter) -> Vec<&Task> {
        filter_tasks(self.tasks(), filter, self.clock.now())
    }

    /// Calendar window `offset_weeks` away from the current week.
    pub fn week(&self, offset_weeks: i64) -> Option<WeekWindow> {
        week_window(self.clock.now(), offset_weeks)
    }

    pub fn weekly_report(&self) -> WeeklyReport {
        build_weekly_report(self.events(), self.tasks(), self.clock.now())
    }

    /// Writes the current snapshot and reports the outcome.
    pub fn persist(&self) -> RepoResult<()> {
        self.repo.save_snapshot(self.tasks(), self.events())
    }

    fn persist_after(&self, operation: &'static str) {
        if let Err(err) = self.persist() {
            error!(
                "event=snapshot_persist module=service status=error operation={operation} error={err}"
            );
        }
    }
}
