//! Integration tests for the MonitorService cycle and reset paths.
//!
//! These drive the engine with scripted draws and a fixed clock and
//! assert on snapshots and the emitted event stream.

use crate::mock_ports::{RecordingSink, ScriptedEntropy, local};

use binsense::adapters::entropy::SeededEntropy;
use binsense::app::events::AppEvent;
use binsense::app::service::MonitorService;
use binsense::config::MonitorConfig;
use binsense::connection::ConnectionHealth;
use binsense::error::Error;
use binsense::fill::{StatusLevel, classify};
use binsense::notifications::{LOG_CAPACITY, NotificationKind, Priority};

fn engine(config: MonitorConfig, entropy: ScriptedEntropy) -> MonitorService<ScriptedEntropy> {
    MonitorService::new(config, entropy, local(7)).unwrap()
}

// ── Scenario A: 88 + 3 during business hours ─────────────────

#[test]
fn crossing_during_business_hours_raises_one_warning() {
    let config = MonitorConfig {
        initial_percentage: 88.0,
        busy_fill_rate_max: 4.0,
        ..Default::default()
    };
    let mut svc = engine(config, ScriptedEntropy::new(&[0.75, 0.5], 0.5));
    let mut sink = RecordingSink::new();
    let before = svc.notifications().len();

    let report = svc.tick(local(12), &mut sink);

    assert!((report.step.previous - 88.0).abs() < 1e-9);
    assert!((report.step.current - 91.0).abs() < 1e-9);
    assert_eq!(svc.notifications().len(), before + 1);
    let newest = &svc.notifications()[0];
    assert_eq!(newest.kind(), NotificationKind::Warning);
    assert_eq!(newest.priority(), Priority::High);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::ThresholdCrossed(_))),
        1
    );
}

// ── Scenario B: classification at 95 ─────────────────────────

#[test]
fn ninety_five_percent_is_emergency() {
    assert_eq!(classify(95.0), StatusLevel::Emergency);
    let svc = engine(
        MonitorConfig {
            initial_percentage: 95.0,
            ..Default::default()
        },
        ScriptedEntropy::constant(0.5),
    );
    assert_eq!(svc.fill_snapshot().status(), StatusLevel::Emergency);
}

// ── Scenario C: reset on a full log ──────────────────────────

#[test]
fn reset_on_full_log_keeps_ten_and_evicts_oldest() {
    let mut svc = engine(
        MonitorConfig {
            seed_history: true,
            ..Default::default()
        },
        ScriptedEntropy::constant(0.5),
    );
    let mut sink = RecordingSink::new();
    for _ in 0..5 {
        svc.manual_reset(local(9), &mut sink).unwrap();
    }
    let full = svc.notifications();
    assert_eq!(full.len(), LOG_CAPACITY);
    let oldest = full.last().unwrap().id();

    let reset = svc.manual_reset(local(10), &mut sink).unwrap();

    let after = svc.notifications();
    assert_eq!(after.len(), LOG_CAPACITY);
    assert_eq!(after[0], reset);
    assert_eq!(after[0].kind(), NotificationKind::Success);
    assert!(after.iter().all(|n| n.id() != oldest));
}

// ── Scenario D: floor guard ──────────────────────────────────

#[test]
fn enforced_floor_rejects_reset_without_side_effects() {
    let mut svc = engine(
        MonitorConfig {
            initial_percentage: 5.0,
            enforce_reset_floor: true,
            ..Default::default()
        },
        ScriptedEntropy::constant(0.5),
    );
    let mut sink = RecordingSink::new();

    let result = svc.manual_reset(local(12), &mut sink);

    assert!(matches!(
        result,
        Err(Error::ResetNotAllowed { percentage, floor }) if percentage == 5.0 && floor == 10.0
    ));
    assert!((svc.fill_snapshot().percentage - 5.0).abs() < f64::EPSILON);
    assert_eq!(svc.fill_snapshot().last_emptied_at, local(7));
    assert!(svc.notifications().is_empty());
}

// ── Reset semantics ──────────────────────────────────────────

#[test]
fn reset_always_zeroes_and_stamps_time() {
    for start in [0.0, 4.0, 50.0, 100.0] {
        let mut svc = engine(
            MonitorConfig {
                initial_percentage: start,
                ..Default::default()
            },
            ScriptedEntropy::constant(0.5),
        );
        let mut sink = RecordingSink::new();
        svc.manual_reset(local(16), &mut sink).unwrap();

        let fill = svc.fill_snapshot();
        assert_eq!(fill.percentage, 0.0);
        assert_eq!(fill.last_emptied_at, local(16));
        assert_eq!(svc.count_by_priority(Priority::Medium), 1);
        assert_eq!(sink.count(|e| matches!(e, AppEvent::Emptied(_))), 1);
    }
}

#[test]
fn fifteen_resets_leave_ten_newest_first() {
    let mut svc = engine(MonitorConfig::default(), ScriptedEntropy::constant(0.5));
    let mut sink = RecordingSink::new();
    let ids: Vec<_> = (0..15)
        .map(|_| svc.manual_reset(local(12), &mut sink).unwrap().id())
        .collect();

    let kept: Vec<_> = svc.notifications().iter().map(|n| n.id()).collect();
    let expected: Vec<_> = ids.iter().rev().take(LOG_CAPACITY).copied().collect();
    assert_eq!(kept, expected);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::NotificationEvicted(_))),
        5
    );
}

// ── Fill model through the engine ────────────────────────────

#[test]
fn off_hours_growth_is_slow() {
    let mut svc = engine(
        MonitorConfig {
            initial_percentage: 40.0,
            ..Default::default()
        },
        ScriptedEntropy::constant(0.99),
    );
    let mut sink = RecordingSink::new();
    let report = svc.tick(local(22), &mut sink);
    assert!(report.step.current - report.step.previous < 0.5);
}

#[test]
fn level_saturates_at_one_hundred() {
    let mut svc = engine(
        MonitorConfig {
            initial_percentage: 99.5,
            ..Default::default()
        },
        ScriptedEntropy::constant(0.99),
    );
    let mut sink = RecordingSink::new();
    for _ in 0..20 {
        svc.tick(local(12), &mut sink);
    }
    assert_eq!(svc.fill_snapshot().percentage, 100.0);
    assert_eq!(svc.count_by_priority(Priority::High), 0);
}

#[test]
fn sustained_level_above_line_alerts_once_until_recrossed() {
    let mut svc = engine(
        MonitorConfig {
            initial_percentage: 89.0,
            ..Default::default()
        },
        ScriptedEntropy::constant(0.9),
    );
    let mut sink = RecordingSink::new();
    for _ in 0..10 {
        svc.tick(local(12), &mut sink);
    }
    assert_eq!(svc.count_by_priority(Priority::High), 1);

    svc.manual_reset(local(12), &mut sink).unwrap();
    for _ in 0..60 {
        svc.tick(local(12), &mut sink);
    }
    assert_eq!(svc.count_by_priority(Priority::High), 2);
}

// ── Connection health ────────────────────────────────────────

#[test]
fn disconnect_rate_is_close_to_five_percent() {
    let mut link = ConnectionHealth::new(0.05);
    let mut entropy = SeededEntropy::from_seed(0xB1_5E_75);
    const CYCLES: usize = 100_000;

    let down = (0..CYCLES).filter(|_| !link.reroll(&mut entropy)).count();
    let rate = down as f64 / CYCLES as f64;
    assert!((0.045..0.055).contains(&rate), "disconnect rate {rate}");
}

#[test]
fn every_tick_publishes_telemetry() {
    let mut svc = engine(MonitorConfig::default(), ScriptedEntropy::constant(0.5));
    let mut sink = RecordingSink::new();
    for _ in 0..3 {
        svc.tick(local(12), &mut sink);
    }
    let ticks: Vec<u64> = sink
        .events()
        .iter()
        .filter_map(|e| match e {
            AppEvent::Sampled(t) => Some(t.tick_count),
            _ => None,
        })
        .collect();
    assert_eq!(ticks, vec![1, 2, 3]);
}
