//! Derived dashboard figures.
//!
//! Nothing here is stored; every field is recomputed from an engine
//! snapshot at the moment the telemetry is built.

use serde::{Deserialize, Serialize};

use crate::app::ports::Timestamp;
use crate::fill::StatusLevel;

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryData {
    pub container_id: String,
    pub percentage: f64,
    pub status: StatusLevel,
    pub connected: bool,
    pub minutes_to_full: u32,
    pub days_since_emptied: u64,
    pub urgent_count: usize,
    pub notification_count: usize,
    pub tick_count: u64,
    pub reset_allowed: bool,
}

/// Rough minutes until the container is full.
pub fn minutes_to_full(percentage: f64, minutes_per_percent: f64) -> u32 {
    let remaining = (100.0 - percentage).max(0.0);
    (remaining * minutes_per_percent).round() as u32
}

/// Whole days elapsed since the last emptying.  Never negative, even if
/// the clock moved backwards.
pub fn days_since(last_emptied_at: Timestamp, now: Timestamp) -> u64 {
    (now - last_emptied_at).num_days().max(0) as u64
}
