//! Fill-level model and status classification.
//!
//! Each sampling cycle the container fills by a random increment whose
//! upper bound depends on the hour of day: busy hours fill faster than
//! nights.  The level only ever moves up between resets and is always
//! clamped to `[0, 100]`.

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::app::ports::{EntropyPort, Timestamp};
use crate::config::MonitorConfig;

// ═══════════════════════════════════════════════════════════════
//  Status classification
// ═══════════════════════════════════════════════════════════════

/// Derived status band.  Never stored; always recomputed from the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    /// Below 50%.
    Normal,
    /// 50% up to 70%.
    Medium,
    /// 70% up to 90%.
    Warning,
    /// 90% up to 95%.
    Critical,
    /// 95% and above.
    Emergency,
}

impl StatusLevel {
    /// Human-readable label for dashboards.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Medium => "Half Full",
            Self::Warning => "Warning",
            Self::Critical => "Very Full",
            Self::Emergency => "Critical - Empty Now",
        }
    }
}

impl core::fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a fill percentage.
///
/// Bands use inclusive lower and exclusive upper bounds; the top band is
/// closed at 100.  Values outside `[0, 100]` fall into the nearest band.
pub fn classify(percentage: f64) -> StatusLevel {
    if percentage >= 95.0 {
        StatusLevel::Emergency
    } else if percentage >= 90.0 {
        StatusLevel::Critical
    } else if percentage >= 70.0 {
        StatusLevel::Warning
    } else if percentage >= 50.0 {
        StatusLevel::Medium
    } else {
        StatusLevel::Normal
    }
}

// ═══════════════════════════════════════════════════════════════
//  Fill state
// ═══════════════════════════════════════════════════════════════

/// Read-only copy of the fill state handed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillSnapshot {
    pub percentage: f64,
    pub last_emptied_at: Timestamp,
}

impl FillSnapshot {
    pub fn status(&self) -> StatusLevel {
        classify(self.percentage)
    }
}

/// Result of one [`FillLevelModel::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillStep {
    pub previous: f64,
    pub current: f64,
}

/// Clamp a level into `[0, 100]`.  NaN collapses to 0.
pub(crate) fn clamp_percentage(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Fill-level model: current percentage plus the last-emptied time.
#[derive(Debug, Clone)]
pub struct FillLevelModel {
    percentage: f64,
    last_emptied_at: Timestamp,
    busy_hours: (u8, u8),
    busy_rate_max: f64,
    quiet_rate_max: f64,
}

impl FillLevelModel {
    pub fn new(config: &MonitorConfig, last_emptied_at: Timestamp) -> Self {
        Self {
            percentage: clamp_percentage(config.initial_percentage),
            last_emptied_at,
            busy_hours: (config.busy_hours_start, config.busy_hours_end),
            busy_rate_max: config.busy_fill_rate_max,
            quiet_rate_max: config.quiet_fill_rate_max,
        }
    }

    /// Whether `hour` lies in the busy window (both ends inclusive).
    pub fn is_busy_hour(&self, hour: u32) -> bool {
        let (start, end) = self.busy_hours;
        (u32::from(start)..=u32::from(end)).contains(&hour)
    }

    /// Upper bound of the increment drawn at `now`.
    pub fn rate_max_at(&self, now: &Timestamp) -> f64 {
        if self.is_busy_hour(now.hour()) {
            self.busy_rate_max
        } else {
            self.quiet_rate_max
        }
    }

    /// Advance one cycle.
    ///
    /// Draws an increment uniformly from `[0, rate_max)` where the bound
    /// depends on the hour of `now`, adds it, clamps and stores the result.
    /// Returns both the old and new level so the caller can detect
    /// threshold crossings on the same pair.
    pub fn advance(&mut self, now: &Timestamp, entropy: &mut impl EntropyPort) -> FillStep {
        let draw = entropy.uniform();
        // Out-of-range draws from a faulty source are pinned to [0, 1].
        let draw = if draw.is_finite() { draw.clamp(0.0, 1.0) } else { 0.0 };
        let increment = draw * self.rate_max_at(now);

        let previous = self.percentage;
        self.percentage = clamp_percentage(previous + increment);
        FillStep {
            previous,
            current: self.percentage,
        }
    }

    /// Empty the container: level to 0, last-emptied to `now`.
    pub fn reset(&mut self, now: Timestamp) {
        self.percentage = 0.0;
        self.last_emptied_at = now;
    }

    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    pub fn last_emptied_at(&self) -> Timestamp {
        self.last_emptied_at
    }

    pub fn status(&self) -> StatusLevel {
        classify(self.percentage)
    }

    pub fn snapshot(&self) -> FillSnapshot {
        FillSnapshot {
            percentage: self.percentage,
            last_emptied_at: self.last_emptied_at,
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
