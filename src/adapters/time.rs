//! System clock adapter.
//!
//! Implements [`TimePort`] with the host's local wall clock.  Hour-of-day
//! for the busy-hours rule is taken from the same local time.

use chrono::Local;

use crate::app::ports::{TimePort, Timestamp};

/// Wall-clock time source backed by `chrono::Local`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl TimePort for SystemClock {
    fn now(&self) -> Timestamp {
        Local::now()
    }
}
