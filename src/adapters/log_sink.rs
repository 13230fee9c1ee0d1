//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing every application event as one
//! structured log line.  The binary routes these through
//! `tracing-subscriber`; a library user gets whatever `log` backend
//! they installed.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Sampled(t) => {
                info!(
                    "SAMPLE | {} | {:.1}% ({}) | link={} | full_in~{}min | \
                     emptied {}d ago | urgent={} notes={} | tick={}",
                    t.container_id,
                    t.percentage,
                    t.status,
                    if t.connected { "UP" } else { "DOWN" },
                    t.minutes_to_full,
                    t.days_since_emptied,
                    t.urgent_count,
                    t.notification_count,
                    t.tick_count,
                );
            }
            AppEvent::ThresholdCrossed(n) => {
                warn!("ALERT | {} [{}/{:?}] {}", n.id(), n.kind().label(), n.priority(), n.message());
            }
            AppEvent::Emptied(n) => {
                info!("RESET | {} at {}", n.id(), n.timestamp().format("%H:%M:%S"));
            }
            AppEvent::ResetRejected { percentage, floor } => {
                warn!("RESET | rejected at {:.1}% (floor {:.0}%)", percentage, floor);
            }
            AppEvent::ConnectionChanged { connected } => {
                info!("LINK | {}", if *connected { "restored" } else { "lost" });
            }
            AppEvent::NotificationEvicted(id) => {
                info!("LOG | evicted {}", id);
            }
            AppEvent::Started { period_ms } => {
                info!("START | period={}ms", period_ms);
            }
            AppEvent::Stopped => {
                info!("STOP | sampling halted");
            }
        }
    }
}
