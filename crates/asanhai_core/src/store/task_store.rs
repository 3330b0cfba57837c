//! Task collection and its mutators.
//!
//! # Responsibility
//! - Create, toggle, reschedule and delete tasks in insertion order.
//! - Append `Completed` / `Rescheduled` events for the mutations that
//!   produce history.
//!
//! # Invariants
//! - Inputs are validated and the target is looked up before any write, so
//!   an error never leaves a partial mutation behind.
//! - Every toggle appends a `Completed` event, including un-completing.
//! - Deletion does not emit an event.

use crate::clock::Timestamp;
use crate::model::bulk::parse_bulk_line;
use crate::model::event::HistoryEvent;
use crate::model::task::{parse_deadline, validate_title, Task, TaskId};
use crate::store::event_log::EventLog;
use crate::store::{StoreError, StoreResult};
use log::{debug, info};

/// Owner of the current task set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a store from a persisted snapshot, keeping its order.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Adds one task from raw user input.
    ///
    /// # Errors
    /// - `Validation` when the title is blank or the deadline is missing or
    ///   not a `YYYY-MM-DD` date.
    pub fn add(
        &mut self,
        title: &str,
        description: &str,
        deadline: &str,
        now: Timestamp,
    ) -> StoreResult<TaskId> {
        let title = validate_title(title)?;
        let deadline = parse_deadline(deadline)?;

        let task = Task::new(title, description, deadline, now);
        let id = task.id;
        self.tasks.push(task);
        info!("event=task_add module=store status=ok task_id={id}");
        Ok(id)
    }

    /// Adds every line that yields a title and a deadline; the rest are
    /// skipped silently. Returns the number of tasks added.
    pub fn add_bulk<I, S>(&mut self, lines: I, now: Timestamp) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        let mut skipped = 0;
        for line in lines {
            match parse_bulk_line(line.as_ref()) {
                Some(entry) => {
                    self.tasks.push(Task::new(
                        entry.title,
                        entry.description,
                        entry.deadline,
                        now,
                    ));
                    added += 1;
                }
                None => skipped += 1,
            }
        }
        info!("event=task_add_bulk module=store status=ok added={added} skipped={skipped}");
        added
    }

    /// Flips completion and returns the previous state.
    ///
    /// # Errors
    /// - `NotFound` when `id` is absent.
    pub fn toggle_complete(
        &mut self,
        id: TaskId,
        events: &mut EventLog,
        now: Timestamp,
    ) -> StoreResult<bool> {
        let task = self.get_mut(id)?;
        let previous = task.completed;
        task.completed = !previous;
        events.append(HistoryEvent::completed(task.title.clone(), now));
        debug!(
            "event=task_toggle module=store status=ok task_id={id} completed={}",
            !previous
        );
        Ok(previous)
    }

    /// Moves a task to a new deadline and records the change.
    ///
    /// # Errors
    /// - `NotFound` when `id` is absent.
    /// - `Validation` when `new_deadline` does not parse.
    pub fn reschedule(
        &mut self,
        id: TaskId,
        new_deadline: &str,
        events: &mut EventLog,
        now: Timestamp,
    ) -> StoreResult<()> {
        let index = self.position(id)?;
        let to_deadline = parse_deadline(new_deadline)?;

        let task = &mut self.tasks[index];
        events.append(HistoryEvent::rescheduled(
            task.title.clone(),
            task.deadline,
            to_deadline,
            now,
        ));
        task.deadline = to_deadline;
        info!("event=task_reschedule module=store status=ok task_id={id}");
        Ok(())
    }

    /// Deletes a task. Absent ids are a no-op; returns whether a task was
    /// removed.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let removed = self.tasks.len() != before;
        info!(
            "event=task_remove module=store status={} task_id={id}",
            if removed { "ok" } else { "skip" }
        );
        removed
    }

    /// Snapshot of all tasks in insertion order.
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn position(&self, id: TaskId) -> StoreResult<usize> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn get_mut(&mut self, id: TaskId) -> StoreResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(StoreError::NotFound(id))
    }
}
