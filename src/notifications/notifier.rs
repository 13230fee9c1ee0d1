//! Threshold notifier.
//!
//! Turns fill-level steps and manual resets into [`Notification`]s and
//! owns the monotonic id counter, so two notifications created within
//! the same clock tick still get distinct ids.

use chrono::Duration;
use log::info;

use super::{Notification, NotificationId, NotificationKind, Priority};
use crate::app::ports::Timestamp;
use crate::error::Result;
use crate::fill::FillStep;

/// Message attached to every manual-reset notification.
pub const RESET_MESSAGE: &str = "Container emptied manually from the dashboard";

/// Detects upward crossings of the warning line and builds notifications.
#[derive(Debug, Clone)]
pub struct ThresholdNotifier {
    threshold: f64,
    next_id: u64,
}

impl ThresholdNotifier {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            next_id: 1,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// True iff `previous < threshold <= current`.
    pub fn crosses(&self, previous: f64, current: f64) -> bool {
        previous < self.threshold && current >= self.threshold
    }

    /// Build a notification with the next id.  The id is only consumed
    /// when construction succeeds.
    pub fn compose(
        &mut self,
        kind: NotificationKind,
        priority: Priority,
        message: &str,
        timestamp: Timestamp,
    ) -> Result<Notification> {
        let notification =
            Notification::new(NotificationId(self.next_id), kind, priority, message, timestamp)?;
        self.next_id += 1;
        Ok(notification)
    }

    /// Evaluate one cycle's step.  Produces a `warning`/`high`
    /// notification only on a strict upward crossing.
    pub fn on_cycle(&mut self, step: FillStep, now: Timestamp) -> Result<Option<Notification>> {
        if !self.crosses(step.previous, step.current) {
            return Ok(None);
        }
        info!(
            "Notifier: {:.1}% -> {:.1}% crossed the {:.0}% line",
            step.previous, step.current, self.threshold
        );
        let message = format!(
            "Attention! Container at {:.0}% - schedule emptying soon",
            self.threshold
        );
        self.compose(NotificationKind::Warning, Priority::High, &message, now)
            .map(Some)
    }

    /// Always produces one `success`/`medium` notification.
    pub fn on_manual_reset(&mut self, now: Timestamp) -> Result<Notification> {
        self.compose(NotificationKind::Success, Priority::Medium, RESET_MESSAGE, now)
    }
}

/// The dashboard's initial history, newest first, timestamped relative
/// to `now`.  Ids are drawn from `notifier` so they never collide with
/// later notifications.
pub fn demo_history(notifier: &mut ThresholdNotifier, now: Timestamp) -> Result<Vec<Notification>> {
    let seeds: [(NotificationKind, Priority, &str, i64); 5] = [
        (
            NotificationKind::Full,
            Priority::High,
            "Container full - requires immediate emptying",
            30,
        ),
        (
            NotificationKind::Warning,
            Priority::Medium,
            "Container at 90% capacity",
            165,
        ),
        (
            NotificationKind::Success,
            Priority::Low,
            "Container emptied successfully",
            375,
        ),
        (
            NotificationKind::Info,
            Priority::Low,
            "Temperature sensor working correctly",
            1_330,
        ),
        (
            NotificationKind::Success,
            Priority::Medium,
            "Scheduled maintenance completed",
            1_520,
        ),
    ];

    // Oldest gets the lowest id.
    let mut history = Vec::with_capacity(seeds.len());
    for (kind, priority, message, minutes_ago) in seeds.iter().rev() {
        let at = now - Duration::minutes(*minutes_ago);
        history.push(notifier.compose(*kind, *priority, message, at)?);
    }
    history.reverse();
    Ok(history)
}
