//! Integration tests for the Monitor handle: lifecycle, sampler-driven
//! ticks and the snapshot API the presentation layer reads.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::mock_ports::{MockClock, RecordingSink, ScriptedEntropy, local};

use binsense::Monitor;
use binsense::adapters::channel_sink::{ChannelSink, FeedChannel};
use binsense::app::commands::AppCommand;
use binsense::app::events::AppEvent;
use binsense::config::MonitorConfig;
use binsense::error::Error;
use binsense::notifications::{NotificationKind, Priority};
use embassy_sync::channel::Channel;

fn fast(config: MonitorConfig) -> MonitorConfig {
    MonitorConfig {
        sample_period_ms: 100,
        ..config
    }
}

#[test]
fn lifecycle_is_idempotent() {
    let sink = RecordingSink::new();
    let monitor = Monitor::new(
        fast(MonitorConfig::default()),
        ScriptedEntropy::constant(0.5),
        sink.clone(),
        MockClock::at_hour(12),
    )
    .unwrap();

    monitor.stop();
    monitor.start().unwrap();
    monitor.start().unwrap();
    monitor.stop();
    monitor.stop();

    assert_eq!(sink.count(|e| matches!(e, AppEvent::Started { period_ms: 100 })), 1);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Stopped)), 1);
}

#[test]
fn no_samples_after_stop() {
    let sink = RecordingSink::new();
    let monitor = Monitor::new(
        fast(MonitorConfig::default()),
        ScriptedEntropy::constant(0.5),
        sink.clone(),
        MockClock::at_hour(12),
    )
    .unwrap();

    monitor.start().unwrap();
    thread::sleep(Duration::from_millis(350));
    monitor.stop();
    let sampled = sink.count(|e| matches!(e, AppEvent::Sampled(_)));
    assert!(sampled >= 1);

    thread::sleep(Duration::from_millis(300));
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Sampled(_))), sampled);
    assert_eq!(monitor.telemetry().tick_count, sampled as u64);
}

#[test]
fn threshold_alert_reaches_the_feed() {
    static FEED: FeedChannel = Channel::new();
    let sink = ChannelSink::new(&FEED);
    let subscriber = sink.clone();

    let config = MonitorConfig {
        initial_percentage: 89.0,
        ..Default::default()
    };
    let monitor = Monitor::new(
        fast(config),
        ScriptedEntropy::constant(0.9),
        sink,
        MockClock::at_hour(12),
    )
    .unwrap();

    let report = monitor.sample_now();
    assert!(report.raised.is_some());

    let events = subscriber.drain();
    assert!(matches!(events.first(), Some(AppEvent::ThresholdCrossed(n)) if n.priority() == Priority::High));
    assert!(matches!(events.last(), Some(AppEvent::Sampled(_))));
}

#[test]
fn manual_reset_uses_clock_time() {
    let clock = MockClock::at_hour(12);
    let monitor = Monitor::new(
        MonitorConfig::default(),
        ScriptedEntropy::constant(0.5),
        RecordingSink::new(),
        clock.clone(),
    )
    .unwrap();

    clock.set(local(17));
    monitor.manual_reset().unwrap();

    let fill = monitor.get_fill_snapshot();
    assert_eq!(fill.percentage, 0.0);
    assert_eq!(fill.last_emptied_at, local(17));
    let notes = monitor.get_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].kind(), NotificationKind::Success);
}

#[test]
fn guard_can_be_enabled_at_runtime() {
    let monitor = Monitor::new(
        MonitorConfig {
            initial_percentage: 3.0,
            ..Default::default()
        },
        ScriptedEntropy::constant(0.5),
        RecordingSink::new(),
        MockClock::at_hour(12),
    )
    .unwrap();

    monitor
        .handle_command(AppCommand::SetResetFloorEnforced(true))
        .unwrap();
    assert!(matches!(
        monitor.manual_reset(),
        Err(Error::ResetNotAllowed { .. })
    ));
    assert!(!monitor.telemetry().reset_allowed);
}

#[test]
fn resets_and_ticks_from_many_threads_stay_consistent() {
    let monitor = Arc::new(
        Monitor::new(
            MonitorConfig::default(),
            ScriptedEntropy::constant(0.9),
            RecordingSink::new(),
            MockClock::at_hour(12),
        )
        .unwrap(),
    );

    let workers: Vec<_> = (0..4)
        .map(|i| {
            let m = monitor.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    if i % 2 == 0 {
                        m.sample_now();
                    } else {
                        m.manual_reset().unwrap();
                    }
                }
            })
        })
        .collect();
    for w in workers {
        w.join().unwrap();
    }

    let t = monitor.telemetry();
    assert_eq!(t.tick_count, 100);
    assert!((0.0..=100.0).contains(&t.percentage));
    assert!(monitor.get_notifications().len() <= 10);
}

#[test]
fn days_since_emptied_follows_the_clock() {
    let clock = MockClock::at_hour(12);
    let monitor = Monitor::new(
        MonitorConfig::default(),
        ScriptedEntropy::constant(0.5),
        RecordingSink::new(),
        clock.clone(),
    )
    .unwrap();

    clock.advance(chrono::Duration::hours(50));
    assert_eq!(monitor.telemetry().days_since_emptied, 2);
    monitor.manual_reset().unwrap();
    assert_eq!(monitor.telemetry().days_since_emptied, 0);
}
