//! Core domain logic for the ASAN HAI task tracker.
//! This crate is the single source of truth for business invariants:
//! time-bucket classification, the append-only history log and the weekly
//! report derived from it.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock, Timestamp};
pub use config::{ConfigError, TrackerConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::event::{HistoryEvent, HistoryEventKind};
pub use model::task::{parse_deadline, Task, TaskId, TaskValidationError};
pub use query::classifier::{classify, filter_tasks, Buckets, TaskFilter, UnknownFilter};
pub use query::report::{build_weekly_report, WeeklyReport};
pub use query::week::{week_window, WeekWindow};
pub use repo::json_snapshot::JsonFileSnapshotRepository;
pub use repo::snapshot_repo::SqliteSnapshotRepository;
pub use repo::{RepoError, RepoResult, Snapshot, SnapshotRepository};
pub use service::tracker_service::TrackerService;
pub use store::event_log::EventLog;
pub use store::state::AppState;
pub use store::task_store::TaskStore;
pub use store::{StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
