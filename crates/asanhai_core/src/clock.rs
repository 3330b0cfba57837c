//! Injectable source of "now".
//!
//! # Invariants
//! - A `Timestamp` carries the local UTC offset it was read in; calendar-day
//!   comparisons use `Timestamp::date_naive()` in that offset.

use chrono::{DateTime, FixedOffset, Local};

/// Instant with the local offset attached.
pub type Timestamp = DateTime<FixedOffset>;

/// Supplies the current instant for mutations and queries.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall clock in the process-local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Local::now().fixed_offset()
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// Closures work as clocks, which lets tests advance time between calls.
impl<F> Clock for F
where
    F: Fn() -> Timestamp,
{
    fn now(&self) -> Timestamp {
        self()
    }
}
