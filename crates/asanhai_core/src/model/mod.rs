//! Domain model for dated tasks and their activity history.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Own boundary parsing of user-entered deadlines and bulk input lines.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId` that is never reused.
//! - Deletion is immediate; history events outlive the tasks they mention.

pub mod bulk;
pub mod event;
pub mod task;
