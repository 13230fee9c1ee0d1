//! Outbound application events.
//!
//! The [`MonitorService`](super::service::MonitorService) and the
//! [`Monitor`](crate::monitor::Monitor) emit these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: write a log line, feed a
//! subscriber channel, record them in a test.

use crate::notifications::{Notification, NotificationId};
use crate::telemetry::TelemetryData;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Periodic sampling started (carries the period).
    Started { period_ms: u64 },

    /// Periodic sampling stopped.
    Stopped,

    /// One sampling cycle completed.
    Sampled(TelemetryData),

    /// The fill level crossed the warning line upwards.
    ThresholdCrossed(Notification),

    /// The container was emptied by a manual reset.
    Emptied(Notification),

    /// A manual reset was refused by the floor guard.
    ResetRejected { percentage: f64, floor: f64 },

    /// The connectivity flag flipped.
    ConnectionChanged { connected: bool },

    /// A notification fell off the end of the bounded log.
    NotificationEvicted(NotificationId),
}
