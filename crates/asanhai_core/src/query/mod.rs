//! Pure, on-demand read views over tasks and history.
//!
//! # Responsibility
//! - Classify tasks into time buckets relative to "now".
//! - Compute Monday-to-Sunday week windows.
//! - Aggregate the weekly activity report.
//!
//! # Invariants
//! - Nothing here mutates state or caches results; every call recomputes.
//! - Date comparisons use calendar days only.

pub mod classifier;
pub mod report;
pub mod week;
