//! Thread-safe monitor handle.
//!
//! [`Monitor`] is the surface the presentation layer talks to.  It keeps
//! the [`MonitorService`] and its event sink behind one
//! `parking_lot::Mutex`, so a sampler tick and a manual reset are
//! mutually exclusive critical sections, and it owns the [`Sampler`]
//! that drives `tick`.
//!
//! Readers only ever receive copies: snapshots, a cloned notification
//! list, a telemetry record.

use std::sync::Arc;

use log::{debug, info};
use parking_lot::Mutex;

use crate::app::commands::AppCommand;
use crate::app::events::AppEvent;
use crate::app::ports::{EntropyPort, EventSink, TimePort};
use crate::app::service::{CycleReport, MonitorService};
use crate::config::MonitorConfig;
use crate::connection::ConnectionSnapshot;
use crate::error::Result;
use crate::fill::FillSnapshot;
use crate::notifications::{Notification, Priority};
use crate::sampler::Sampler;
use crate::telemetry::TelemetryData;

struct Core<R: EntropyPort, S: EventSink> {
    service: MonitorService<R>,
    sink: S,
}

impl<R: EntropyPort, S: EventSink> Core<R, S> {
    fn tick(&mut self, now: crate::app::ports::Timestamp) -> CycleReport {
        let Self { service, sink } = self;
        service.tick(now, sink)
    }
}

/// Engine handle combining a mutex-guarded [`MonitorService`] with its
/// [`Sampler`].
pub struct Monitor<R, S, T>
where
    R: EntropyPort + Send + 'static,
    S: EventSink + Send + 'static,
    T: TimePort + Send + Sync + 'static,
{
    core: Arc<Mutex<Core<R, S>>>,
    clock: Arc<T>,
    sampler: Mutex<Option<Sampler>>,
}

impl<R, S, T> Monitor<R, S, T>
where
    R: EntropyPort + Send + 'static,
    S: EventSink + Send + 'static,
    T: TimePort + Send + Sync + 'static,
{
    /// Build the engine.  Sampling does not begin until [`start`](Self::start).
    pub fn new(config: MonitorConfig, entropy: R, sink: S, clock: T) -> Result<Self> {
        let service = MonitorService::new(config, entropy, clock.now())?;
        Ok(Self {
            core: Arc::new(Mutex::new(Core { service, sink })),
            clock: Arc::new(clock),
            sampler: Mutex::new(None),
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Begin periodic sampling.  A no-op when already running.
    pub fn start(&self) -> Result<()> {
        let mut slot = self.sampler.lock();
        if slot.as_ref().is_some_and(Sampler::is_running) {
            debug!("Monitor already running");
            return Ok(());
        }

        let period = self.core.lock().service.config().sample_period();
        let core = self.core.clone();
        let clock = self.clock.clone();
        let sampler = Sampler::start(period, move || {
            let now = clock.now();
            core.lock().tick(now).into_result().map(|_| ())
        })?;

        {
            let mut core = self.core.lock();
            core.sink.emit(&AppEvent::Started {
                period_ms: period.as_millis() as u64,
            });
        }
        info!("Monitor started");
        *slot = Some(sampler);
        Ok(())
    }

    /// Halt periodic sampling.  Idempotent; once this returns no further
    /// tick is delivered.
    pub fn stop(&self) {
        let Some(mut sampler) = self.sampler.lock().take() else {
            return;
        };
        sampler.stop();
        self.core.lock().sink.emit(&AppEvent::Stopped);
        info!("Monitor stopped");
    }

    pub fn is_running(&self) -> bool {
        self.sampler.lock().as_ref().is_some_and(Sampler::is_running)
    }

    // ── Mutators ──────────────────────────────────────────────

    /// Mark the container as emptied at the clock's current time.
    pub fn manual_reset(&self) -> Result<()> {
        let now = self.clock.now();
        let mut core = self.core.lock();
        let Core { service, sink } = &mut *core;
        service.manual_reset(now, sink).map(|_| ())
    }

    /// Route a command into the engine.
    pub fn handle_command(&self, cmd: AppCommand) -> Result<()> {
        let now = self.clock.now();
        let mut core = self.core.lock();
        let Core { service, sink } = &mut *core;
        service.handle_command(cmd, now, sink)
    }

    /// Run one cycle immediately, under the same lock the sampler uses.
    pub fn sample_now(&self) -> CycleReport {
        let now = self.clock.now();
        self.core.lock().tick(now)
    }

    // ── Snapshots ─────────────────────────────────────────────

    pub fn get_fill_snapshot(&self) -> FillSnapshot {
        self.core.lock().service.fill_snapshot()
    }

    pub fn get_connection_snapshot(&self) -> ConnectionSnapshot {
        self.core.lock().service.connection_snapshot()
    }

    /// Newest first, at most ten entries.
    pub fn get_notifications(&self) -> Vec<Notification> {
        self.core.lock().service.notifications()
    }

    pub fn count_by_priority(&self, priority: Priority) -> usize {
        self.core.lock().service.count_by_priority(priority)
    }

    pub fn telemetry(&self) -> TelemetryData {
        let now = self.clock.now();
        self.core.lock().service.build_telemetry(now)
    }
}

impl<R, S, T> Drop for Monitor<R, S, T>
where
    R: EntropyPort + Send + 'static,
    S: EventSink + Send + 'static,
    T: TimePort + Send + Sync + 'static,
{
    fn drop(&mut self) {
        self.stop();
    }
}
