//! Application service — the hexagonal core.
//!
//! [`MonitorService`] owns the fill-level model, connection-health model,
//! threshold notifier and notification log.  `tick` and `manual_reset`
//! are its only mutators; everything else hands out copies.  The random
//! source is injected, time is passed in per call, and events leave
//! through an [`EventSink`] supplied at the call site.
//!
//! ```text
//!  EntropyPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                  │        MonitorService         │
//!  tick / reset ──▶│ Fill · Connection · Notifier  │──▶ snapshots
//!                  │       NotificationLog         │
//!                  └──────────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::MonitorConfig;
use crate::connection::{ConnectionHealth, ConnectionSnapshot};
use crate::error::{Error, Result};
use crate::fill::{FillLevelModel, FillSnapshot, FillStep};
use crate::notifications::{Notification, NotificationId, NotificationLog, Priority, ThresholdNotifier, demo_history};
use crate::telemetry::{TelemetryData, days_since, minutes_to_full};

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{EntropyPort, EventSink, Timestamp};

// ───────────────────────────────────────────────────────────────
// Cycle report
// ───────────────────────────────────────────────────────────────

/// Outcome of one sampling cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// Level before and after this cycle's advance.
    pub step: FillStep,
    /// Id of the threshold notification raised this cycle, if any.
    pub raised: Option<NotificationId>,
    /// Connectivity after this cycle's re-roll.
    pub connected: bool,
    /// Set when part of the cycle failed.  The fill and connection
    /// updates still took effect.
    pub fault: Option<Error>,
}

impl CycleReport {
    /// `Err` when the cycle recorded a fault.
    pub fn into_result(self) -> Result<Self> {
        match self.fault {
            Some(e) => Err(e),
            None => Ok(self),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// MonitorService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct MonitorService<R: EntropyPort> {
    config: MonitorConfig,
    fill: FillLevelModel,
    connection: ConnectionHealth,
    notifier: ThresholdNotifier,
    log: NotificationLog,
    entropy: R,
    tick_count: u64,
}

impl<R: EntropyPort> MonitorService<R> {
    /// Construct the engine.  `now` becomes the initial last-emptied time.
    ///
    /// Fails fast on an invalid configuration.
    pub fn new(config: MonitorConfig, entropy: R, now: Timestamp) -> Result<Self> {
        config.validate()?;

        let fill = FillLevelModel::new(&config, now);
        let connection = ConnectionHealth::new(config.disconnect_probability);
        let mut notifier = ThresholdNotifier::new(config.warning_threshold_percent);
        let mut log = NotificationLog::new();

        if config.seed_history {
            // Push oldest first so the log ends up newest-first.
            for seeded in demo_history(&mut notifier, now)?.into_iter().rev() {
                log.push(seeded);
            }
        }

        info!(
            "MonitorService ready: container={} level={:.1}% threshold={:.0}% floor={:.0}% (enforced={})",
            config.container_id,
            fill.percentage(),
            config.warning_threshold_percent,
            config.reset_floor_percent,
            config.enforce_reset_floor
        );

        Ok(Self {
            config,
            fill,
            connection,
            notifier,
            log,
            entropy,
            tick_count: 0,
        })
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full cycle: advance fill → compare/notify → re-roll link.
    ///
    /// The crossing check always uses the pair produced by this cycle's
    /// advance.  A failure building the notification is recorded in the
    /// report; it never rolls back the fill update.
    pub fn tick(&mut self, now: Timestamp, sink: &mut impl EventSink) -> CycleReport {
        self.tick_count += 1;

        // 1. Fill level
        let step = self.fill.advance(&now, &mut self.entropy);

        // 2. Threshold check on the same pair
        let mut raised = None;
        let mut fault = None;
        match self.notifier.on_cycle(step, now) {
            Ok(Some(notification)) => {
                warn!(
                    "Fill level {:.1}% reached the warning line ({})",
                    step.current,
                    notification.id()
                );
                raised = Some(notification.id());
                sink.emit(&AppEvent::ThresholdCrossed(notification.clone()));
                self.record(notification, sink);
            }
            Ok(None) => {}
            Err(e) => fault = Some(e),
        }

        // 3. Connectivity
        let was_connected = self.connection.is_connected();
        let connected = self.connection.reroll(&mut self.entropy);
        if connected != was_connected {
            if connected {
                info!("Connection restored");
            } else {
                warn!("Connection lost");
            }
            sink.emit(&AppEvent::ConnectionChanged { connected });
        }

        sink.emit(&AppEvent::Sampled(self.build_telemetry(now)));

        CycleReport {
            step,
            raised,
            connected,
            fault,
        }
    }

    // ── Manual reset ──────────────────────────────────────────

    /// Mark the container as emptied.
    ///
    /// With the floor guard enforced, a level below the floor is refused
    /// with [`Error::ResetNotAllowed`] and nothing changes.  Otherwise the
    /// level drops to exactly 0, `last_emptied_at` becomes `now`, and one
    /// `success`/`medium` notification is logged.
    pub fn manual_reset(&mut self, now: Timestamp, sink: &mut impl EventSink) -> Result<Notification> {
        let percentage = self.fill.percentage();
        let floor = self.config.reset_floor_percent;
        if self.config.enforce_reset_floor && percentage < floor {
            warn!("Manual reset refused: {:.1}% is below the {:.0}% floor", percentage, floor);
            sink.emit(&AppEvent::ResetRejected { percentage, floor });
            return Err(Error::ResetNotAllowed { percentage, floor });
        }

        // Build first so a failure leaves the state untouched.
        let notification = self.notifier.on_manual_reset(now)?;
        self.fill.reset(now);
        info!("Container emptied manually (was {:.1}%)", percentage);

        sink.emit(&AppEvent::Emptied(notification.clone()));
        self.record(notification.clone(), sink);
        Ok(notification)
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        now: Timestamp,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        match cmd {
            AppCommand::ManualReset => self.manual_reset(now, sink).map(|_| ()),
            AppCommand::SetResetFloorEnforced(enforced) => {
                self.config.enforce_reset_floor = enforced;
                info!("Reset floor guard {}", if enforced { "enabled" } else { "disabled" });
                Ok(())
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn fill_snapshot(&self) -> FillSnapshot {
        self.fill.snapshot()
    }

    pub fn connection_snapshot(&self) -> ConnectionSnapshot {
        self.connection.snapshot()
    }

    /// Copy of the notification log, newest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.log.snapshot()
    }

    pub fn count_by_priority(&self, priority: Priority) -> usize {
        self.log.count_by_priority(priority)
    }

    /// Whether a manual reset would pass the floor check right now.
    pub fn reset_allowed(&self) -> bool {
        self.fill.percentage() >= self.config.reset_floor_percent
    }

    /// Build a telemetry snapshot from the current state.
    pub fn build_telemetry(&self, now: Timestamp) -> TelemetryData {
        let fill = self.fill.snapshot();
        TelemetryData {
            container_id: self.config.container_id.clone(),
            percentage: fill.percentage,
            status: fill.status(),
            connected: self.connection.is_connected(),
            minutes_to_full: minutes_to_full(fill.percentage, self.config.minutes_per_percent),
            days_since_emptied: days_since(fill.last_emptied_at, now),
            urgent_count: self.log.count_by_priority(Priority::High),
            notification_count: self.log.len(),
            tick_count: self.tick_count,
            reset_allowed: self.reset_allowed(),
        }
    }

    /// Total cycles executed since construction.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn record(&mut self, notification: Notification, sink: &mut impl EventSink) {
        if let Some(evicted) = self.log.push(notification) {
            sink.emit(&AppEvent::NotificationEvicted(evicted.id()));
        }
    }
}
