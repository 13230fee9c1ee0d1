//! Mock port adapters for integration tests.
//!
//! Scripted entropy, a settable clock and a recording event sink, so
//! tests can drive the engine cycle by cycle and assert on the full
//! event history.

use std::collections::VecDeque;
use std::sync::Arc;

use binsense::app::events::AppEvent;
use binsense::app::ports::{EntropyPort, EventSink, TimePort, Timestamp};
use chrono::{Local, TimeZone};
use parking_lot::Mutex;

// ── ScriptedEntropy ───────────────────────────────────────────

/// Replays queued draws, then repeats `fallback` forever.
pub struct ScriptedEntropy {
    draws: VecDeque<f64>,
    fallback: f64,
}

#[allow(dead_code)]
impl ScriptedEntropy {
    pub fn new(draws: &[f64], fallback: f64) -> Self {
        Self {
            draws: draws.iter().copied().collect(),
            fallback,
        }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(&[], value)
    }
}

impl EntropyPort for ScriptedEntropy {
    fn uniform(&mut self) -> f64 {
        self.draws.pop_front().unwrap_or(self.fallback)
    }
}

// ── MockClock ─────────────────────────────────────────────────

/// Clock that only moves when a test moves it.  Clones share the time.
#[derive(Clone)]
pub struct MockClock {
    now: Arc<Mutex<Timestamp>>,
}

#[allow(dead_code)]
impl MockClock {
    /// 2024-01-15 at `hour`:30 local time.
    pub fn at_hour(hour: u32) -> Self {
        Self {
            now: Arc::new(Mutex::new(local(hour))),
        }
    }

    pub fn set(&self, t: Timestamp) {
        *self.now.lock() = t;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl TimePort for MockClock {
    fn now(&self) -> Timestamp {
        *self.now.lock()
    }
}

pub fn local(hour: u32) -> Timestamp {
    Local
        .with_ymd_and_hms(2024, 1, 15, hour, 30, 0)
        .earliest()
        .unwrap()
}

// ── RecordingSink ─────────────────────────────────────────────

/// Records every event.  Clones share the record, so a test can keep
/// one copy while the monitor owns another.
#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<AppEvent>>>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AppEvent> {
        self.events.lock().clone()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.lock().iter().filter(|e| pred(e)).count()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.lock().push(event.clone());
    }
}
