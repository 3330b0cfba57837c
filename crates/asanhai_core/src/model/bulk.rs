//! Bulk-input line parser.
//!
//! Each line is `title, description, deadline`. Fields are trimmed,
//! `description` may be empty and fields past the third are ignored.
//! Lines without a title or a valid deadline yield `None`.

use crate::model::task::{parse_deadline, validate_title};
use chrono::NaiveDate;

/// One accepted bulk line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkEntry {
    pub title: String,
    pub description: String,
    pub deadline: NaiveDate,
}

/// Parses one pasted line into a task entry.
pub fn parse_bulk_line(line: &str) -> Option<BulkEntry> {
    let mut fields = line.split(',').map(str::trim);
    let title = fields.next().unwrap_or_default();
    let description = fields.next().unwrap_or_default();
    let deadline = fields.next().unwrap_or_default();

    let title = validate_title(title).ok()?;
    let deadline = parse_deadline(deadline).ok()?;

    Some(BulkEntry {
        title: title.to_string(),
        description: description.to_string(),
        deadline,
    })
}
