//! Monitor configuration parameters
//!
//! All tunable parameters for the fill-level engine.  Values can be
//! overridden from a JSON file through a [`ConfigPort`](crate::app::ports::ConfigPort).

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Core monitor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Container label reported in telemetry
    pub container_id: String,

    // --- Sampling ---
    /// Sampling period (milliseconds)
    pub sample_period_ms: u64,

    // --- Fill model ---
    /// Fill level at engine start (0-100%)
    pub initial_percentage: f64,
    /// First busy hour of the day (inclusive, 0-23)
    pub busy_hours_start: u8,
    /// Last busy hour of the day (inclusive, 0-23)
    pub busy_hours_end: u8,
    /// Exclusive upper bound of the per-cycle increment during busy hours
    pub busy_fill_rate_max: f64,
    /// Exclusive upper bound of the per-cycle increment outside busy hours
    pub quiet_fill_rate_max: f64,

    // --- Thresholds ---
    /// Upward crossing of this level raises the warning alert (0-100%)
    pub warning_threshold_percent: f64,
    /// Manual reset floor (0-100%)
    pub reset_floor_percent: f64,
    /// Reject manual resets below the floor inside the engine
    pub enforce_reset_floor: bool,

    // --- Connectivity ---
    /// Per-cycle probability of a simulated connectivity fault (0-1)
    pub disconnect_probability: f64,

    // --- Telemetry ---
    /// Minutes-to-full estimate factor per remaining percent
    pub minutes_per_percent: f64,
    /// Pre-populate the notification log with the demo history
    pub seed_history: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            container_id: "WC-001".to_string(),

            sample_period_ms: 3000,

            initial_percentage: 75.0,
            busy_hours_start: 8,
            busy_hours_end: 18,
            busy_fill_rate_max: 2.0,
            quiet_fill_rate_max: 0.5,

            warning_threshold_percent: 90.0,
            reset_floor_percent: 10.0,
            enforce_reset_floor: false,

            disconnect_probability: 0.05,

            minutes_per_percent: 1.2,
            seed_history: false,
        }
    }
}

fn is_percentage(value: f64) -> bool {
    value.is_finite() && (0.0..=100.0).contains(&value)
}

impl MonitorConfig {
    /// Range-check every field.  Called by config adapters on load and
    /// before save, and by the engine at construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(100..=60_000).contains(&self.sample_period_ms) {
            return Err(ConfigError::ValidationFailed(
                "sample_period_ms must be 100–60000",
            ));
        }
        if !is_percentage(self.initial_percentage) {
            return Err(ConfigError::ValidationFailed(
                "initial_percentage must be 0–100",
            ));
        }
        if !is_percentage(self.warning_threshold_percent) {
            return Err(ConfigError::ValidationFailed(
                "warning_threshold_percent must be 0–100",
            ));
        }
        if !is_percentage(self.reset_floor_percent) {
            return Err(ConfigError::ValidationFailed(
                "reset_floor_percent must be 0–100",
            ));
        }
        if self.busy_hours_start > 23 || self.busy_hours_end > 23 {
            return Err(ConfigError::ValidationFailed(
                "busy hours must be 0–23",
            ));
        }
        if self.busy_hours_start > self.busy_hours_end {
            return Err(ConfigError::ValidationFailed(
                "busy_hours_start must be <= busy_hours_end",
            ));
        }
        if !(self.busy_fill_rate_max.is_finite() && self.busy_fill_rate_max >= 0.0) {
            return Err(ConfigError::ValidationFailed(
                "busy_fill_rate_max must be finite and >= 0",
            ));
        }
        if !(self.quiet_fill_rate_max.is_finite() && self.quiet_fill_rate_max >= 0.0) {
            return Err(ConfigError::ValidationFailed(
                "quiet_fill_rate_max must be finite and >= 0",
            ));
        }
        if !(self.disconnect_probability.is_finite()
            && (0.0..=1.0).contains(&self.disconnect_probability))
        {
            return Err(ConfigError::ValidationFailed(
                "disconnect_probability must be 0–1",
            ));
        }
        if !(self.minutes_per_percent.is_finite() && self.minutes_per_percent >= 0.0) {
            return Err(ConfigError::ValidationFailed(
                "minutes_per_percent must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Sampling period as a [`Duration`](core::time::Duration).
    pub fn sample_period(&self) -> core::time::Duration {
        core::time::Duration::from_millis(self.sample_period_ms)
    }
}
