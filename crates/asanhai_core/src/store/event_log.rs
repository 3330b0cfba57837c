//! Append-only history log.
//!
//! # Invariants
//! - Read order is insertion order.
//! - No API edits or removes an appended event.

use crate::model::event::HistoryEvent;
use log::{debug, warn};

/// Ordered sequence of [`HistoryEvent`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<HistoryEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a log from a persisted snapshot, keeping its order.
    pub fn from_events(events: Vec<HistoryEvent>) -> Self {
        Self { events }
    }

    /// Appends one event.
    ///
    /// An event older than the current tail is still appended (insertion
    /// order wins) but reported as clock skew.
    pub fn append(&mut self, event: HistoryEvent) {
        if let Some(last) = self.events.last() {
            if event.occurred_at() < last.occurred_at() {
                warn!(
                    "event=history_append module=store status=skew position={} last_at={} new_at={}",
                    self.events.len(),
                    last.occurred_at().to_rfc3339(),
                    event.occurred_at().to_rfc3339()
                );
            }
        }
        debug!(
            "event=history_append module=store status=ok kind={:?} position={}",
            event.kind(),
            self.events.len()
        );
        self.events.push(event);
    }

    pub fn all(&self) -> &[HistoryEvent] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
